//! File-backed persistence for the Galleon login core
//!
//! Concrete implementations of the core's storage capabilities:
//!
//! - [`SettingsFile`]: the duress settings document as a single JSON file
//!   in a private per-app directory
//! - [`DiskKeyValueStore`]: the namespaced key-value store as flat files
//!
//! Both write whole values with no locking; last writer wins, and the core
//! tolerates torn or missing data by degrading to defaults on the next read.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod key_value;
pub mod settings_file;

pub use key_value::DiskKeyValueStore;
pub use settings_file::SettingsFile;
