//! File-count capping

use crate::types::FileChange;

/// Cap the number of files considered for review.
///
/// Within the limit the input is returned unchanged. Over the limit the
/// largest files by change volume win, sorted descending; the sort is
/// stable so equal-sized files keep their input order.
pub fn limit_files(files: Vec<FileChange>, max_files: usize) -> Vec<FileChange> {
    if files.len() <= max_files {
        return files;
    }

    tracing::warn!(
        total = files.len(),
        max_files,
        "too many changed files, keeping the largest by change volume"
    );

    let mut files = files;
    files.sort_by(|a, b| b.change_size().cmp(&a.change_size()));
    files.truncate(max_files);
    files
}
