//! Environment configuration
//!
//! `.env` files are read before argument parsing so that clap's `env`
//! fallbacks (DATABASE_URL, ROSTER_BIND, ...) can see them.

use std::path::{Path, PathBuf};

/// Get the roster config directory path (~/.roster)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roster"))
}

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.roster/.env
///
/// dotenvy never overwrites a variable that is already set, so loading the
/// current directory first gives it precedence over the home file.
///
/// Returns the files that were loaded. Nothing is logged here because
/// tracing is not initialized yet.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if load_file(&env_file) {
            loaded.push(env_file);
        }
    }

    loaded
}

fn load_file(path: &Path) -> bool {
    path.exists() && dotenvy::from_path(path).is_ok()
}
