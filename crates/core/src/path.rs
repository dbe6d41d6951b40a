//! Route-path string utilities.
//!
//! Paths are `/`-separated, with `/` as the root. Backend menu records mix
//! absolute paths (top-level entries like `/system`) with relative ones
//! (children like `user`), so joining has to accept both.

/// Iterate the non-empty segments of a path.
///
/// `"/system/user/"` yields `"system"`, `"user"`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Normalize a path to a canonical absolute form: leading `/`, no trailing
/// `/` (except for the root itself), empty input becomes the root.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for seg in segments(path) {
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Join a child path onto a base path.
///
/// An absolute child (leading `/`) stands on its own; a relative child is
/// appended to the base. The result is always in normalized form.
pub fn join(base: &str, child: &str) -> String {
    if child.starts_with('/') {
        return normalize(child);
    }
    if child.is_empty() {
        return normalize(base);
    }
    let base = normalize(base);
    if base == "/" {
        normalize(&format!("/{child}"))
    } else {
        normalize(&format!("{base}/{child}"))
    }
}
