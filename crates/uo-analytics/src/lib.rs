//! uo-analytics: sensor anomaly detection.
//!
//! A z-score scaler feeding an Isolation Forest, an alert engine over the
//! predictions, and a seeded synthetic sensor stream for demos and tests.

pub mod alert;
pub mod forest;
pub mod scaler;
pub mod stream;

pub use alert::{AlertLevel, AlertSummary, classify_batch};
pub use forest::{ForestConfig, IsolationForest};
pub use scaler::StandardScaler;
pub use stream::{SensorBatch, StreamConfig, generate_batch};
