//! # postbuild
//!
//! Post-build helpers for a packaged desktop application.
//!
//! - **Packaging**: move the fresh build into its final folder, purge temporary
//!   build directories, copy extra assets, and launch the executable. Only a
//!   missing build is fatal; every other failure is recorded and the run goes on.
//! - **Version**: a compiled-in version for packaged runs, the `VERSION` file
//!   for source runs, `0.0.0` when neither is available.

pub mod cli;
pub mod common;
pub mod packager;
pub mod version;
