//! Build-profile aware settings loading with a CLI override.
//! See `bin/settings_demo.rs` for a demo binary exercising it end to end.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
