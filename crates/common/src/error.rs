use thiserror::Error;

/// Fatal errors raised before the polling loop starts.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure talking to the homework API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("API returned HTTP status {status}")]
    Status { status: u16 },

    #[error("API request failed: {0}")]
    Request(String),

    #[error("API response is not valid JSON: {0}")]
    Decode(String),
}

/// The API answered, but not in the documented shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{context} is not an object")]
    NotAMapping { context: &'static str },

    #[error("{context} has no `{field}` field")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("`{field}` in {context} is not {expected}")]
    WrongFieldType {
        context: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("`{field}` in {context} is empty")]
    EmptyField {
        context: &'static str,
        field: &'static str,
    },

    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

/// Anything that can go wrong during one poll cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Failure delivering a notification to the messaging channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("delivery request failed: {0}")]
    Request(String),

    #[error("messaging API rejected the message (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}
