pub mod error;
pub mod fetch;
pub mod files;
pub mod transform;
pub mod worker;

mod context;
pub use context::FinContext;

pub mod prelude {
    pub use crate::context::FinContext;
    pub use crate::error::{FetchError, FileError, WorkerError};
    pub use crate::fetch::{FetchClient, FetchResponse};
    pub use crate::files::FileStore;
    pub use crate::worker::WorkerHandle;
}
