use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("no memory item with id: {0}")]
    NotFound(Uuid),
}
