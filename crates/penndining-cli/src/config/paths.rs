//! Config file location.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory under the user config root.
const APP_DIR_NAME: &str = "penndining";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set and non-empty, returns
///   `$XDG_CONFIG_HOME/penndining/config.toml`.
/// - Otherwise returns `~/.config/penndining/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_with_env(dir, |key| std::env::var(key).ok())
}

/// Resolution logic with an injectable environment lookup.
fn resolve_with_env(
    dir: Option<&PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE_NAME));
    }

    let config_root = if let Some(xdg) = env("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(xdg)
    } else {
        let home = env("HOME").context("HOME environment variable is not set")?;
        PathBuf::from(home).join(".config")
    };
    Ok(config_root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| String::from(*v))
        }
    }

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/penndining-test");

        // Act
        let path = resolve_with_env(Some(&dir), env_of(&[])).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/penndining-test/config.toml"));
    }

    #[test]
    fn test_resolve_home_default() {
        // Arrange & Act
        let path = resolve_with_env(None, env_of(&[("HOME", "/home/quaker")])).unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/quaker/.config/penndining/config.toml")
        );
    }

    #[test]
    fn test_resolve_prefers_xdg_config_home() {
        // Arrange & Act
        let path = resolve_with_env(
            None,
            env_of(&[("HOME", "/home/quaker"), ("XDG_CONFIG_HOME", "/xdg")]),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/penndining/config.toml"));
    }

    #[test]
    fn test_resolve_ignores_empty_xdg_config_home() {
        // Arrange & Act
        let path = resolve_with_env(
            None,
            env_of(&[("HOME", "/home/quaker"), ("XDG_CONFIG_HOME", "")]),
        )
        .unwrap();

        // Assert
        assert!(path.ends_with(".config/penndining/config.toml"));
    }

    #[test]
    fn test_resolve_without_home_fails() {
        // Arrange & Act
        let result = resolve_with_env(None, env_of(&[]));

        // Assert
        assert!(result.is_err());
    }
}
