pub mod config;
pub mod errors;
pub mod safety;

pub use config::{CopyEntry, Layout, PackConfig, PurgeTargets};
pub use errors::{PackError, PackResult};
