//! File logging.
//!
//! The terminal is owned by the UI, so log records go to
//! `glyphrain.log` in the platform cache directory instead of stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target, WriteStyle};

use crate::config::APP_NAME;

/// Initialize logging from `RUST_LOG` (default `warn`).
///
/// Returns the log file path, or `None` when no cache directory is
/// available and logging stays disabled.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)?;
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir).ok()?;
    let path = dir.join("glyphrain.log");
    let file = File::create(&path).ok()?;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()
        .ok()?;
    Some(path)
}
