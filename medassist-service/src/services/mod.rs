pub mod assistant;
pub mod extraction;
pub mod metrics;
pub mod prompts;
pub mod providers;

pub use assistant::Assistant;
pub use metrics::{get_metrics, init_metrics};
