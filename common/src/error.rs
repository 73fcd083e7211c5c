use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}
