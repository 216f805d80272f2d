pub mod config;
#[allow(dead_code)] // Frontend-facing contract, driven by the UI rather than this binary
pub mod scan;
pub mod verdict;

pub use config::Config;
pub use verdict::{ClassificationVerdict, ImageQuality, VerdictStatus};
