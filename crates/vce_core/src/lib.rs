//! VCE Core - Backend logic for Video Chapter Editor
//!
//! This crate contains all business logic with zero UI dependencies:
//! the ffmetadata chapter codec, the chapter set editor, and the ffmpeg
//! subprocess glue. It can be used by the GUI application or a CLI tool.

pub mod chapters;
pub mod config;
pub mod ffmpeg;
pub mod logging;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
