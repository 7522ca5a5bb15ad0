pub mod anomaly;

pub use anomaly::Anomaly;
