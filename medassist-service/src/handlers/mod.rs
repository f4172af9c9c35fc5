pub mod assist;
pub mod documents;
pub mod health;

pub use assist::{chat, predict};
pub use documents::process_document;
pub use health::{health_check, metrics, preflight, readiness, root};
