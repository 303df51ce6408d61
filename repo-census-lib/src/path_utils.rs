//! Path utilities for safe filesystem operations.

/// Make a repository owner, repository name, or slice name safe to use as one path component.
///
/// `..` sequences and filesystem separators or reserved characters become `_`. A single `.` is
/// kept, so names like `next.js` survive intact.
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    let s = s.replace("..", "__");
    s.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}
