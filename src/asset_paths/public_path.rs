use std::path::{Component, Path, PathBuf};

/// Determine the URL prefix that is prepended to every manifest entry.
///
/// A configured public path that is not blank wins verbatim. Otherwise the prefix is the
/// relative path leading from the directory of the manifest file back to the build output
/// root, so the manifest keeps working when it is written into a subdirectory. Non-empty
/// results always end in `/`.
pub fn resolve_public_path(configured: &str, output_path: &Path, manifest_filename: &str) -> String {
    let mut public_path = if configured.trim().is_empty() {
        relative_public_path(output_path, manifest_filename)
    } else {
        configured.to_string()
    };

    if !public_path.is_empty() && !public_path.ends_with('/') {
        public_path.push('/');
    }

    public_path
}

fn relative_public_path(output_path: &Path, manifest_filename: &str) -> String {
    let output_root = normalise(&absolute(output_path));
    let manifest_dir = match Path::new(manifest_filename).parent() {
        Some(parent) => normalise(&output_root.join(parent)),
        None => output_root.clone(),
    };

    pathdiff::diff_paths(&output_root, &manifest_dir)
        .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lexically resolve `.` and `..` components.
fn normalise(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(result.components().next_back(), Some(Component::Normal(_))) {
                    result.pop();
                } else if !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}
