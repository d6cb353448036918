//! Configuration.
//!
//! Two sources, loaded separately:
//! - the companies file (TOML) listing employers and search terms, re-read on
//!   every run so it can be edited without restarting a scheduled process
//! - runtime [`Settings`] from environment variables (with `.env` support)

mod companies;
mod settings;

pub use companies::ScrapeConfig;
pub use settings::Settings;
