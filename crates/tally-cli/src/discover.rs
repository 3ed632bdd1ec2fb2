//! Locating survey workbooks on disk

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directories searched when none are given
pub const DEFAULT_DATA_DIRS: [&str; 2] = ["data", "."];

fn is_workbook(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_lowercase().ends_with(".xlsx"))
}

/// Find `*.xlsx` files (any case) directly inside each directory.
///
/// Directories that do not exist are skipped. The result is
/// de-duplicated and sorted.
pub fn find_workbooks<P: AsRef<Path>>(dirs: &[P]) -> io::Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for dir in dirs {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            log::debug!("skipping '{}': not a directory", dir.display());
            continue;
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_workbook(&path) {
                found.insert(path);
            }
        }
    }

    log::info!("found {} workbook(s)", found.len());
    Ok(found.into_iter().collect())
}
