// SPDX-License-Identifier: AGPL-3.0-or-later

use std::env;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Returns the absolute path of a file or directory.
///
/// Relative paths are resolved against the current directory, or returned cleaned but unchanged
/// when it can not be determined.
pub fn absolute_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if path.is_absolute() {
        return path.clean();
    }

    match env::current_dir() {
        Ok(current_dir) => current_dir.join(path).clean(),
        Err(_) => path.clean(),
    }
}
