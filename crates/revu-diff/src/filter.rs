//! Path filtering with compiled glob patterns

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

use crate::types::FileChange;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Compiled include/exclude matchers, built once per configuration.
///
/// `*` matches within one path segment, `**` crosses segments, and a
/// pattern that is not anchored (does not start with `**` or `/`) also
/// matches starting at any path-segment boundary.
#[derive(Debug)]
pub struct FilterSet {
    ignore: GlobSet,
    include_only: Option<GlobSet>,
}

impl FilterSet {
    pub fn new(ignore: &[String], include_only: Option<&[String]>) -> Result<Self, FilterError> {
        let include_only = match include_only {
            Some(patterns) if !patterns.is_empty() => Some(compile_patterns(patterns)?),
            _ => None,
        };
        Ok(Self {
            ignore: compile_patterns(ignore)?,
            include_only,
        })
    }

    /// Whether a file at `path` should be reviewed.
    pub fn should_review(&self, path: &str) -> bool {
        if let Some(include) = &self.include_only {
            if !include.is_match(path) {
                return false;
            }
        }
        !self.ignore.is_match(path)
    }
}

/// Drop files the configuration excludes, preserving order.
pub fn filter_files(files: Vec<FileChange>, filter: &FilterSet) -> Vec<FileChange> {
    let before = files.len();
    let kept: Vec<FileChange> = files
        .into_iter()
        .filter(|file| {
            let keep = filter.should_review(&file.path);
            if !keep {
                tracing::debug!(path = %file.path, "skipping ignored file");
            }
            keep
        })
        .collect();
    if kept.len() != before {
        tracing::debug!(kept = kept.len(), skipped = before - kept.len(), "filtered files");
    }
    kept
}

fn compile_patterns(patterns: &[String]) -> Result<GlobSet, FilterError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // A leading `/` anchors the pattern to the path root
        let anchored = pattern.strip_prefix('/').unwrap_or(pattern);
        builder.add(build_glob(anchored, pattern)?);

        if !pattern.starts_with("**") && !pattern.starts_with('/') {
            // Unanchored patterns may match at any segment boundary
            builder.add(build_glob(&format!("**/{anchored}"), pattern)?);
        }
    }
    builder.build().map_err(|source| FilterError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn build_glob(glob: &str, original: &str) -> Result<globset::Glob, FilterError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|source| FilterError::Pattern {
            pattern: original.to_string(),
            source,
        })
}
