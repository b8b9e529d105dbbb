pub mod copier;
pub mod engine;
pub mod launcher;
pub mod purger;
pub mod relocate;
pub mod report;
pub mod transfer;

pub use engine::run;
pub use launcher::{Launcher, NoopLauncher, SystemLauncher};
pub use report::{Outcome, PackReport, RunStatus, Step, StepRecord};
