use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpentRecordError {
    #[error("spent atomical record of {0} bytes is too short to hold a value at offset {1}")]
    RecordTooShort(usize, usize),
}

pub type SpentRecordResult<T> = std::result::Result<T, SpentRecordError>;
