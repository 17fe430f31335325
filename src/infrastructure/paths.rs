//! Storage location resolution.
//!
//! The list lives under the user's data directory: `$XDG_DATA_HOME/listkeeper`
//! when set, otherwise `$HOME/.local/share/listkeeper`, falling back to a
//! relative `.listkeeper` directory when neither variable is available.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "listkeeper";

/// Returns the default data directory.
///
/// # Examples
///
/// ```
/// use listkeeper::infrastructure::get_data_dir;
///
/// let dir = get_data_dir();
/// assert!(dir.ends_with("listkeeper") || dir.ends_with(".listkeeper"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    home.map_or_else(
        || PathBuf::from(".listkeeper"),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the home directory.
///
/// # Examples
///
/// ```
/// use listkeeper::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var_os("HOME").as_deref().map(Path::new))
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if path == "~" {
        home.display().to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = data_dir_from(Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/xdg/listkeeper"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = data_dir_from(Some(PathBuf::from("rel")), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/listkeeper"));
    }

    #[test]
    fn no_environment_falls_back_to_relative_dir() {
        assert_eq!(data_dir_from(None, None), PathBuf::from(".listkeeper"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/u");
        assert_eq!(expand_tilde_with("~", Some(home)), "/home/u");
        assert_eq!(expand_tilde_with("~/lists", Some(home)), "/home/u/lists");
        assert_eq!(expand_tilde_with("~other", Some(home)), "~other");
        assert_eq!(expand_tilde_with("~/lists", None), "~/lists");
    }
}
