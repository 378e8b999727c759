use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload is empty")]
    Empty,

    #[error("payload is not valid CBOR: {0}")]
    Decode(String),

    #[error("decoded payload top level is not a map")]
    NotAMap,

    #[error("payload map contains a non-text key")]
    NonTextKey,

    #[error("payload field '{0}' must be a map")]
    FieldNotAMap(&'static str),

    #[error("payload field '{field}' contains a banned {kind} value at '{path}'")]
    BannedValue { field: &'static str, kind: &'static str, path: String },

    #[error("payload could not be encoded: {0}")]
    Encode(String),
}

pub type PayloadResult<T> = std::result::Result<T, PayloadError>;
