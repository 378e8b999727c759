use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomicalIdError {
    #[error("compact id must have the output separator 'i' at offset 64")]
    MissingSeparator,

    #[error("compact id hash part is not 32 bytes of hex")]
    InvalidHash,

    #[error("compact id output index '{0}' is not an unsigned decimal")]
    InvalidIndex(String),

    #[error("compact id output index {0} is greater than the maximum of {1}")]
    IndexOutOfRange(u64, u32),

    #[error("binary id must be 36 bytes but got {0}")]
    InvalidLength(usize),
}

pub type AtomicalIdResult<T> = std::result::Result<T, AtomicalIdError>;
