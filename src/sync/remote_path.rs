//! Local-to-remote path mapping.

use std::path::{Component, Path};

/// Map a path relative to the watch root onto the remote base path.
///
/// The remote machine is always POSIX, so the result is joined with `/`
/// whatever the local separator is: `remote_base + "/" + relative`.
pub fn remote_path(remote_base: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", remote_base, relative)
}
