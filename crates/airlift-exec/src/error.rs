use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("config: {0}")]
    Config(#[from] airlift_core::error::Error),
    #[error("dataset: {0}")]
    Dataset(#[from] airlift_io::Error),
    #[error("hashing error: {0}")]
    Hash(String),
}
