use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error("store error: {0}")]
    Store(#[from] attest_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
