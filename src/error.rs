/*!
 * Error Handling for the Conformance Harness
 *
 * Every failure carries the vector (node) name and the field or operation it
 * relates to, so a failing run can be diagnosed from the message alone.
 */

use thiserror::Error;

use crate::utils::hex_dump;

/// Error type for all harness operations
#[derive(Debug, Error)]
pub enum KatError {
    #[error("node \"{node}\" does not have attribute \"{field}\"")]
    MissingField { node: String, field: String },

    #[error("{node}:{field}, unrecognizable format \"{format}\"")]
    UnsupportedFormat {
        node: String,
        field: String,
        format: String,
    },

    #[error("{node}:{field} wrong hex value \"{text}\"")]
    MalformedHex {
        node: String,
        field: String,
        text: String,
    },

    #[error("{node}:{field} is not a decimal length: \"{text}\"")]
    MalformedLength {
        node: String,
        field: String,
        text: String,
    },

    #[error("unrecognizable mode in node \"{node}\"")]
    UnknownMode { node: String },

    #[error("wrong key size \"{node}:{}\"", hex::encode(.key))]
    InvalidKeySize { node: String, key: Vec<u8> },

    #[error("wrong iv size \"{node}:{}\"", hex::encode(.iv))]
    InvalidIvSize { node: String, iv: Vec<u8> },

    #[error("{node}: {field} is {len} bytes, wire field holds at most {max}")]
    FieldTooLong {
        node: String,
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error(
        "Out text mismatch in node {node}, operation {operation}:\nIn text:{}Expected out text:{}Real out text:{}",
        hex_dump(.input),
        hex_dump(.expected),
        hex_dump(.actual)
    )]
    OutputMismatch {
        node: String,
        operation: &'static str,
        input: Vec<u8>,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    #[error("Device error: {operation} - {cause}")]
    DeviceError { operation: String, cause: String },

    #[error("Vector document error: {0}")]
    DocumentError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // Field decoding errors: 1000-1999
    pub const MISSING_FIELD: u32 = 1001;
    pub const UNSUPPORTED_FORMAT: u32 = 1002;
    pub const MALFORMED_HEX: u32 = 1003;
    pub const MALFORMED_LENGTH: u32 = 1004;

    // Registry errors: 2000-2999
    pub const UNKNOWN_MODE: u32 = 2001;

    // Vector validation errors: 3000-3999
    pub const INVALID_KEY_SIZE: u32 = 3001;
    pub const INVALID_IV_SIZE: u32 = 3002;
    pub const FIELD_TOO_LONG: u32 = 3003;

    // Verification errors: 4000-4999
    pub const OUTPUT_MISMATCH: u32 = 4001;

    // Device errors: 5000-5999
    pub const DEVICE_FAILURE: u32 = 5001;

    // Document and IO errors: 9000+
    pub const DOCUMENT_INVALID: u32 = 9001;
    pub const IO_FAILURE: u32 = 9002;
}

impl KatError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            KatError::MissingField { .. } => error_codes::MISSING_FIELD,
            KatError::UnsupportedFormat { .. } => error_codes::UNSUPPORTED_FORMAT,
            KatError::MalformedHex { .. } => error_codes::MALFORMED_HEX,
            KatError::MalformedLength { .. } => error_codes::MALFORMED_LENGTH,
            KatError::UnknownMode { .. } => error_codes::UNKNOWN_MODE,
            KatError::InvalidKeySize { .. } => error_codes::INVALID_KEY_SIZE,
            KatError::InvalidIvSize { .. } => error_codes::INVALID_IV_SIZE,
            KatError::FieldTooLong { .. } => error_codes::FIELD_TOO_LONG,
            KatError::OutputMismatch { .. } => error_codes::OUTPUT_MISMATCH,
            KatError::DeviceError { .. } => error_codes::DEVICE_FAILURE,
            KatError::DocumentError(_) => error_codes::DOCUMENT_INVALID,
            KatError::IoError(_) => error_codes::IO_FAILURE,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            KatError::MissingField { .. } => "MissingField",
            KatError::UnsupportedFormat { .. } => "UnsupportedFormat",
            KatError::MalformedHex { .. } => "MalformedHex",
            KatError::MalformedLength { .. } => "MalformedLength",
            KatError::UnknownMode { .. } => "UnknownMode",
            KatError::InvalidKeySize { .. } => "InvalidKeySize",
            KatError::InvalidIvSize { .. } => "InvalidIvSize",
            KatError::FieldTooLong { .. } => "FieldTooLong",
            KatError::OutputMismatch { .. } => "OutputMismatch",
            KatError::DeviceError { .. } => "DeviceError",
            KatError::DocumentError(_) => "DocumentError",
            KatError::IoError(_) => "IoError",
        }
    }

    /// Name of the vector the error was raised for, when known
    pub fn node(&self) -> Option<&str> {
        match self {
            KatError::MissingField { node, .. }
            | KatError::UnsupportedFormat { node, .. }
            | KatError::MalformedHex { node, .. }
            | KatError::MalformedLength { node, .. }
            | KatError::UnknownMode { node }
            | KatError::InvalidKeySize { node, .. }
            | KatError::InvalidIvSize { node, .. }
            | KatError::FieldTooLong { node, .. }
            | KatError::OutputMismatch { node, .. } => Some(node),
            _ => None,
        }
    }
}

/// Convenience constructors for common error types
impl KatError {
    pub fn missing_field(node: &str, field: &str) -> Self {
        KatError::MissingField {
            node: node.to_string(),
            field: field.to_string(),
        }
    }

    pub fn malformed_hex(node: &str, field: &str, text: &str) -> Self {
        KatError::MalformedHex {
            node: node.to_string(),
            field: field.to_string(),
            text: text.to_string(),
        }
    }

    pub fn unknown_mode(node: &str) -> Self {
        KatError::UnknownMode {
            node: node.to_string(),
        }
    }

    pub fn device_error(operation: &str, cause: &str) -> Self {
        KatError::DeviceError {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

// From implementations for automatic error conversion
impl From<std::io::Error> for KatError {
    fn from(err: std::io::Error) -> Self {
        KatError::IoError(err.to_string())
    }
}

impl From<quick_xml::Error> for KatError {
    fn from(err: quick_xml::Error) -> Self {
        KatError::DocumentError(err.to_string())
    }
}

impl From<serde_json::Error> for KatError {
    fn from(err: serde_json::Error) -> Self {
        KatError::DocumentError(err.to_string())
    }
}

/// Result type alias for harness operations
pub type KatResult<T> = Result<T, KatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_generation() {
        let error = KatError::missing_field("AES:ECB", "key");
        assert_eq!(error.error_code(), error_codes::MISSING_FIELD);
        assert_eq!(error.error_type(), "MissingField");
        assert_eq!(error.node(), Some("AES:ECB"));
    }

    #[test]
    fn test_missing_field_message() {
        let error = KatError::missing_field("AES:CBC 1", "key");
        assert_eq!(
            error.to_string(),
            "node \"AES:CBC 1\" does not have attribute \"key\""
        );
    }

    #[test]
    fn test_key_size_message_shows_key_hex() {
        let error = KatError::InvalidKeySize {
            node: "AES:ECB".to_string(),
            key: vec![0xde, 0xad],
        };
        assert_eq!(error.to_string(), "wrong key size \"AES:ECB:dead\"");
    }

    #[test]
    fn test_mismatch_message_carries_dumps() {
        let error = KatError::OutputMismatch {
            node: "AES:CTR".to_string(),
            operation: "ENCRYPT",
            input: vec![0x01],
            expected: vec![0x02],
            actual: vec![0x03],
        };
        let message = error.to_string();
        assert!(message.contains("operation ENCRYPT"));
        assert!(message.contains("01"));
        assert!(message.contains("02"));
        assert!(message.contains("03"));
        assert_eq!(error.error_code(), error_codes::OUTPUT_MISMATCH);
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: KatError = io.into();
        assert_eq!(error.error_type(), "IoError");
        assert!(error.node().is_none());
    }
}
