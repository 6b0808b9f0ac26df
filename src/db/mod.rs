pub mod file;
pub mod memory;
pub mod storage;

mod macros;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use storage::{RecordWriter, Storage, StorageBackend, StorageKey, RECORD_VERSION};
