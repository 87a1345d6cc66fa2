//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`, so
//! a user-facing `~/…` path has to be rewritten before it can be opened.

use std::path::PathBuf;

/// Directory holding the stored bookshelf and the trace log.
///
/// Resolves to `~/.local/share/zellij/bookshelf` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookshelf")
}

/// Rewrites a leading `~` to the sandbox mount point of the host home.
///
/// # Example
///
/// ```rust
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/books"), "/host/books");
/// assert_eq!(expand_tilde("/tmp/books"), "/tmp/books");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_tilde_is_expanded() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a/~/b"), "/host/a/~/b");
        assert_eq!(expand_tilde("~user/books"), "~user/books");
    }

    #[test]
    fn data_dir_lives_under_host_share() {
        assert!(get_data_dir().ends_with("zellij/bookshelf"));
        assert!(get_data_dir().starts_with("/host"));
    }
}
