pub mod spike;

pub use spike::{DetectError, SpikeDetector};
