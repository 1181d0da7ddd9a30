//! Error type for identity-service calls. Variants are user-safe at the
//! `Display` level; raw bodies are sanitized before they get here.

use std::fmt;

#[derive(Clone, Debug)]
pub enum ServiceError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(message) => write!(formatter, "Config error: {message}"),
            ServiceError::Network(message) => write!(formatter, "Network error: {message}"),
            ServiceError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            ServiceError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            ServiceError::Parse(message) => write!(formatter, "Response error: {message}"),
        }
    }
}

impl std::error::Error for ServiceError {}
