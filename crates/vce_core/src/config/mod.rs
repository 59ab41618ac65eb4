//! Application configuration.
//!
//! Settings live in a TOML file organized into sections (`[tools]`,
//! `[logging]`, `[chapters]`). The manager loads-or-creates the file and
//! saves atomically (temp file + rename).

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ChapterSettings, LoggingSettings, Settings, ToolSettings};
