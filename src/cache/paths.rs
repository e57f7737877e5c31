// Cache path utilities.
// Lays out per-project data under the data home: <data_home>/<user>/<project>/.

use std::path::{Path, PathBuf};

/// File name of the comment snapshot inside a project directory.
pub const COMMENTS_FILE: &str = "comments.json";

/// Path to a project's data directory.
pub fn project_dir(data_home: &Path, user: &str, project: &str) -> PathBuf {
    data_home
        .join(sanitize_name(user))
        .join(sanitize_name(project))
}

/// Path to a project's cached comments.
pub fn comments_path(data_home: &Path, user: &str, project: &str) -> PathBuf {
    project_dir(data_home, user, project).join(COMMENTS_FILE)
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores. `.` and `..` become `_`
/// so a component never points outside its parent.
fn sanitize_name(name: &str) -> String {
    if name == "." || name == ".." {
        return "_".to_string();
    }
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
