//! # Keyset Error Types
//!
//! Structured errors for predicate construction. Every failure is immediate and
//! local to one build call; nothing is retried and no partial predicate is returned.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeysetError {
    #[error("Invalid order space: {reason}")]
    InvalidOrderSpace { reason: String },

    #[error("Reference record has no attribute '{name}'")]
    MissingAttribute { name: String },

    #[error("Failed to read attribute '{name}': {message}")]
    AttributeRead { name: String, message: String },

    #[error("Value {value} of '{name}' is not part of its enumeration")]
    ValueOutsideEnumeration { name: String, value: Value },

    #[error("Attribute '{name}' is null but the condition declares no nulls placement")]
    NullReferenceValue { name: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl KeysetError {
    pub fn invalid_order_space(reason: impl Into<String>) -> Self {
        Self::InvalidOrderSpace {
            reason: reason.into(),
        }
    }

    pub fn missing_attribute(name: &str) -> Self {
        Self::MissingAttribute {
            name: name.to_string(),
        }
    }

    pub fn attribute_read(name: &str, message: impl Into<String>) -> Self {
        Self::AttributeRead {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

impl From<::config::ConfigError> for KeysetError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KeysetError>;
