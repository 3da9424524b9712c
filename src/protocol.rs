use serde::Serialize;

/// Envelope shared by every JSON endpoint.
#[derive(Debug, Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: String::new(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

/// A banner shown above a page after a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
}

impl Notice {
    pub fn success<S: ToString>(msg: S) -> Self {
        Notice::Success(msg.to_string())
    }

    pub fn warning<S: ToString>(msg: S) -> Self {
        Notice::Warning(msg.to_string())
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success-box",
            Notice::Warning(_) => "warning-box",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Warning(msg) => msg,
        }
    }
}
