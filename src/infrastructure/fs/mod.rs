//! File system infrastructure

mod local;
mod lock;

pub use local::{atomic_write, copy_file, fingerprint_file, read_json_object};
pub use lock::{BuildLock, LOCK_FILE_NAME};
