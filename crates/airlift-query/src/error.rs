use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown ranking key '{0}' (expected flights, fuel, nox, hc, co or pm25)")]
    UnknownRankKey(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error(transparent)]
    Config(#[from] airlift_core::error::Error),
}
