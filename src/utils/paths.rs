use std::borrow::Cow;
use std::env;
use std::path::Path;

/// Lower-cased extension of a file name
///
/// Empty when the name has no dot, starts with its only dot (`.bashrc`) or ends with a
/// dot (`notes.`).
///
/// # Examples
///
/// ```
/// use explore_index::utils::file_extension;
///
/// assert_eq!(file_extension("Photo.JPG"), "jpg");
/// assert_eq!(file_extension("archive.tar.gz"), "gz");
/// assert_eq!(file_extension(".bashrc"), "");
/// assert_eq!(file_extension("Makefile"), "");
/// ```
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => name[dot + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Path of `path` relative to `root` in index form: `/`-separated, leading `/`
///
/// Returns `None` if `path` is not under `root`. The root itself maps to `/`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use explore_index::utils::record_path;
///
/// let root = Path::new("/srv/files");
/// assert_eq!(record_path(root, Path::new("/srv/files/a/b.txt")).as_deref(), Some("/a/b.txt"));
/// assert_eq!(record_path(root, Path::new("/elsewhere/b.txt")), None);
/// ```
pub fn record_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut normalized = String::new();
    for component in relative.components() {
        normalized.push('/');
        normalized.push_str(&component.as_os_str().to_string_lossy());
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    Some(normalized)
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && Path::new(path_str.as_ref()).starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
