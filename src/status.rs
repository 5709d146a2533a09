use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub enum Status {
    #[default]
    Ok,

    Internal(String),
    InvalidArgument(String),
    NotFound(String),

    /// The catalog service could not be reached.
    Unavailable(String),

    /// The catalog service was reached but answered with a fault.
    Fault(String),
}

impl Status {
    pub fn new(msg: &str, err: impl Error) -> Self {
        Status::Internal(format!("{msg}: '{err}'"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Status::Internal(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status::NotFound(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Status::Unavailable(msg.into())
    }

    pub fn fault(msg: impl Into<String>) -> Self {
        Status::Fault(msg.into())
    }
}

impl From<std::io::Error> for Status {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            _ => Self::new("IO error", err),
        }
    }
}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Self::new("serde error", err)
    }
}

impl From<reqwest::Error> for Status {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(code) => Self::fault(format!("catalog service answered {code}: '{err}'")),
            None => Self::unavailable(format!("reqwest error: '{err}'")),
        }
    }
}

impl Error for Status {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "Ok"),
            Status::Internal(msg) => write!(f, "Internal error: {msg}"),
            Status::InvalidArgument(msg) => write!(f, "Invalid argument error: {msg}"),
            Status::NotFound(msg) => write!(f, "Not found error: {msg}"),
            Status::Unavailable(msg) => write!(f, "Unavailable error: {msg}"),
            Status::Fault(msg) => write!(f, "Service fault: {msg}"),
        }
    }
}
