use std::fmt;

use actix_web::{error::BlockingError, web};
use chrono::NaiveDate;

#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](state, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            tracing::debug!("{} failed: {:#}", $url, err);
                            <$response>::err(err.to_string())
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Run `f` on the blocking thread pool, keeping its own error type.
pub async fn blocking<F, T, E>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<anyhow::Error> + fmt::Debug + Send + 'static,
{
    match web::block(f).await {
        Ok(res) => Ok(res),
        Err(BlockingError::Error(err)) => Err(err),
        Err(BlockingError::Canceled) => Err(anyhow::anyhow!("Blocking task canceled").into()),
    }
}

pub fn format_long_date(date: &NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// `"Medical Records"` -> `"medical-records"`
pub fn slugify<S: AsRef<str>>(s: S) -> String {
    s.as_ref()
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
