//! Bootstrap logging with a runtime-reloadable filter.
//! See `bin/logger_demo.rs` for a demo binary exercising it end to end.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
