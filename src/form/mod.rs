mod error;
mod host;
mod store;

pub use error::ChipError;
pub use host::{FieldRecord, FormStateHost, MemoryFormHost};
pub use store::ChipListStore;
