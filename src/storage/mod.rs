//! Persistence adapters for the flat task and project collections.

mod file;
mod traits;

pub use file::FileStorage;
pub use traits::Storage;
