//! Path helpers for config file discovery

use std::path::PathBuf;

/// Expand a user-supplied path (`~`, `~/x`, relative) to an absolute path.
///
/// Falls back to the input unchanged when the home or current directory
/// cannot be resolved.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/etc/barters.json"), PathBuf::from("/etc/barters.json"));
    }

    #[test]
    fn test_expand_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("barters.json"), cwd.join("barters.json"));
        assert_eq!(expand_path("./conf/a.json"), cwd.join("./conf/a.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.barters/barters.json"), home.join(".barters/barters.json"));
        }
    }

    #[test]
    fn test_expand_path_tilde_user_is_not_home() {
        // `~other` is not expanded
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("~other"), cwd.join("~other"));
    }

    #[test]
    fn test_expand_path_trims_and_handles_empty() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("   "), cwd);
        assert_eq!(expand_path("  a.json  "), cwd.join("a.json"));
    }
}
