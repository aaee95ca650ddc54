//! Status server HTTP handlers.

mod metrics;
mod root;

pub use metrics::{metrics_handler, scrape_deadline};
pub use root::{healthz_handler, root_handler};
