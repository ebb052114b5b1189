//! uo-app: tool registry and evaluation service.
//!
//! The CLI talks to this crate only: resolve a tool, evaluate it with
//! merged/validated inputs, optionally persist and notify.

pub mod error;
pub mod notify;
pub mod registry;
pub mod service;

pub use error::{AppError, AppResult};
pub use notify::{ResultNotification, WebhookNotifier};
pub use registry::{ALL_TOOLS, Suite, ToolDescriptor, ToolId};
pub use service::{EvalSinks, detect_anomalies, evaluate, prepare_inputs, resolve_tool, sweep};
