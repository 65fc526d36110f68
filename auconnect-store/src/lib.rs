pub mod engagement;
pub mod session;

use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error accessing the local store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error encoding a store record: {0}")]
    Encode(#[from] serde_json::Error),
}
