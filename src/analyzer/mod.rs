//! Analysis engine for deciding the next version from the latest merge

pub mod predictor;

pub use predictor::{NextVersion, Prediction, SkipReason, VersionPredictor};
