//! # Shared Store
//!
//! File persistence shared by every pipeline step.
//!
//! ## Components
//!
//! - `table`: typed CSV read/write/append over `serde` row types
//! - `document`: pretty JSON documents (models, reports, lineup caches)
//! - `layout`: where each pipeline file lives under the data and models dirs
//! - `lock`: exclusive `fs2` lock on a data directory
//!
//! Writes go through a temporary sibling file and a rename, so a reader never
//! observes a half-written table.

pub mod document;
pub mod error;
pub mod layout;
pub mod lock;
pub mod table;

pub use document::{read_json, write_json};
pub use error::StoreError;
pub use layout::DataLayout;
pub use lock::{DataDirLock, LockError};
pub use table::{append_csv, read_csv, read_csv_if_exists, write_csv};
