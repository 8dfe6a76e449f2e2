//! Path display helpers.

use std::path::{Component, Path};

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: impl AsRef<Path>) -> String {
    let parts: Vec<String> = path
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect();
    parts.join("/")
}

/// Display name of `path` relative to `base`, with `/` separators.
///
/// Paths outside `base` are rendered whole.
pub fn relative_display(path: impl AsRef<Path>, base: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match path.strip_prefix(base.as_ref()) {
        Ok(relative) => to_slash(relative),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_slash() {
        let path: PathBuf = ["pkg", "templates", "page.html"].iter().collect();
        assert_eq!(to_slash(&path), "pkg/templates/page.html");
        assert_eq!(to_slash("./a/../b"), "a/../b");
    }

    #[test]
    fn test_relative_display() {
        let root = PathBuf::from("/project");
        let file: PathBuf = ["/project", "app", "views.py"].iter().collect();
        assert_eq!(relative_display(&file, &root), "app/views.py");
        assert_eq!(relative_display("/elsewhere/x.py", &root), "/elsewhere/x.py");
    }
}
