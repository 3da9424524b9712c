use crate::schema::cashier;
use serde::Deserialize;

#[derive(Debug, Queryable, Insertable, Deserialize)]
#[table_name = "cashier"]
pub struct CashierData {
    pub cashier_id: i32,
    pub name: String,
    pub designation: String,
}
