//! Runtime configuration
//!
//! Settings come from the environment; there is no config file.

use std::path::PathBuf;

/// Overrides the database location
pub const DATABASE_PATH_ENV: &str = "PRESCRIPTION_DATABASE_PATH";

/// Log filter directive used when `RUST_LOG` does not mention this crate
pub const DEFAULT_LOG_DIRECTIVE: &str = "prescription=info";

const DEFAULT_DATABASE_FILE: &str = "prescription.db";

/// Get the database path from the environment or use `<project>/data/prescription.db`
pub fn get_database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(exe_dir);
    path.push("data");
    path.push(DEFAULT_DATABASE_FILE);
    path
}

/// Go up from target/release or target/debug to the project root
fn project_root(mut path: PathBuf) -> PathBuf {
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_from_target_dir() {
        let root = project_root(PathBuf::from("/work/prescription/target/release"));
        assert_eq!(root, PathBuf::from("/work/prescription"));

        let root = project_root(PathBuf::from("/work/prescription/target/debug"));
        assert_eq!(root, PathBuf::from("/work/prescription"));
    }

    #[test]
    fn test_project_root_elsewhere() {
        let root = project_root(PathBuf::from("/usr/local/bin"));
        assert_eq!(root, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(default_database_path().ends_with("data/prescription.db"));
    }
}
