use crate::schema::billing;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "billing"]
pub struct Invoice {
    pub invoice_id: String,
    pub pat_id: i32,
    pub items: String,
    pub amount: f64,
}
