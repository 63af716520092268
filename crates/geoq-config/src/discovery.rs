//! Configuration file discovery.
//!
//! Discovers `.geoq.toml` files by walking up the directory tree from a
//! starting point, then appending the global `~/.geoq.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".geoq.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global
/// (`~/.geoq.toml`) last. Files closer to `cwd` win during merging.
///
/// The function:
/// 1. Walks up from `cwd` to the filesystem root, collecting `.geoq.toml` files
/// 2. Stops if a config file has `root = true` set
/// 3. Appends `~/.geoq.toml` if it exists and no root config was found
///
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.geoq.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    /// Creates a temporary directory structure for testing.
    struct TestDir {
        root: tempfile::TempDir,
    }

    impl TestDir {
        fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
            }
        }

        fn create_dir(&self, rel_path: &str) -> PathBuf {
            let path = self.root.path().join(rel_path);
            fs::create_dir_all(&path).unwrap();
            path
        }

        fn create_config(&self, rel_path: &str, content: &str) -> PathBuf {
            let dir = self.root.path().join(rel_path);
            fs::create_dir_all(&dir).unwrap();
            let config = dir.join(CONFIG_FILENAME);
            fs::write(&config, content).unwrap();
            config
        }
    }

    #[test]
    fn no_configs_found_in_empty_tree() {
        let test_dir = TestDir::new();
        let subdir = test_dir.create_dir("a/b/c");

        let configs = discover_config_files(&subdir);

        for config in &configs {
            assert!(is_global_config(config), "unexpected config: {config:?}");
        }
    }

    #[test]
    fn closest_config_comes_first() {
        let test_dir = TestDir::new();
        let outer = test_dir.create_config(".", "# outer\n");
        let inner = test_dir.create_config("a/b", "# inner\n");
        let working_dir = test_dir.create_dir("a/b/c");

        let configs = discover_config_files(&working_dir);
        let local: Vec<_> = configs.iter().filter(|p| !is_global_config(p)).collect();

        assert_eq!(local.len(), 2);
        assert_eq!(local[0], &inner);
        assert_eq!(local[1], &outer);
    }

    #[test]
    fn root_config_stops_discovery() {
        let test_dir = TestDir::new();
        let _outer = test_dir.create_config(".", "# outer\n");
        let root = test_dir.create_config("project", "root = true\n");
        let working_dir = test_dir.create_dir("project/src");

        let configs = discover_config_files(&working_dir);

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0], root);
    }

    #[test]
    fn directory_named_like_config_is_skipped() {
        let test_dir = TestDir::new();
        let fake = test_dir.root.path().join(CONFIG_FILENAME);
        fs::create_dir_all(&fake).unwrap();
        let subdir = test_dir.create_dir("subdir");

        let configs = discover_config_files(&subdir);
        let local: Vec<_> = configs.iter().filter(|p| !is_global_config(p)).collect();
        assert!(local.is_empty());
    }

    #[test]
    fn global_config_path_ends_with_filename() {
        let path = global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(CONFIG_FILENAME));
    }
}
