//! The parse → filter → limit → partition pipeline

use revu_core::ReviewOptions;

use crate::chunker::split_into_chunks;
use crate::filter::{filter_files, FilterError, FilterSet};
use crate::limit::limit_files;
use crate::parser::parse_diff;
use crate::types::Chunk;

/// Run the full planning pipeline over raw diff text.
///
/// Empty input, or input where every file is filtered away, yields an
/// empty chunk list — "nothing to review", not an error. The only failure
/// mode is an invalid glob pattern in the configuration.
pub fn plan_chunks(diff_text: &str, options: &ReviewOptions) -> Result<Vec<Chunk>, FilterError> {
    let files = parse_diff(diff_text);
    tracing::debug!(files = files.len(), "parsed diff");

    let filter = FilterSet::new(&options.ignore, options.include_only.as_deref())?;
    let files = filter_files(files, &filter);
    let files = limit_files(files, options.max_files);

    let chunks = split_into_chunks(files, options.max_diff_size);
    tracing::info!(
        chunks = chunks.len(),
        lines = chunks.iter().map(|c| c.total_lines).sum::<usize>(),
        "planned review chunks"
    );
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ReviewOptions {
        ReviewOptions {
            ignore: vec!["*.lock".to_string()],
            include_only: None,
            max_files: 10,
            max_diff_size: 200,
            focus_areas: Vec::new(),
        }
    }

    fn synthetic_diff(files: &[(&str, usize)]) -> String {
        let mut out = String::new();
        for (path, additions) in files {
            out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
            out.push_str(&format!("--- a/{}\n", path));
            out.push_str(&format!("+++ b/{}\n", path));
            out.push_str(&format!("@@ -1,0 +1,{} @@\n", additions));
            for i in 0..*additions {
                out.push_str(&format!("+line {}\n", i));
            }
        }
        out
    }

    #[test]
    fn test_empty_diff_plans_nothing() {
        let chunks = plan_chunks("", &options()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_coverage_equals_filtered_input() {
        let diff = synthetic_diff(&[
            ("src/a.rs", 150),
            ("Cargo.lock", 400),
            ("src/b.rs", 120),
            ("src/c.rs", 90),
        ]);
        let chunks = plan_chunks(&diff, &options()).unwrap();

        let reviewed: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.files.iter().map(|f| f.path.as_str()))
            .collect();
        // Cargo.lock filtered out, everything else covered exactly once,
        // order preserved
        assert_eq!(reviewed, vec!["src/a.rs", "src/b.rs", "src/c.rs"]);
        for chunk in &chunks {
            if chunk.len() > 1 {
                assert!(chunk.total_lines <= 200);
            }
        }
    }

    #[test]
    fn test_limiter_feeds_partitioner() {
        let mut opts = options();
        opts.max_files = 2;
        let diff = synthetic_diff(&[("a.rs", 7), ("b.rs", 150), ("c.rs", 45)]);

        let chunks = plan_chunks(&diff, &opts).unwrap();
        let mut reviewed: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.files.iter().map(|f| f.path.as_str()))
            .collect();
        reviewed.sort();
        assert_eq!(reviewed, vec!["b.rs", "c.rs"]);
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let mut opts = options();
        opts.ignore = vec!["{broken".to_string()];
        assert!(plan_chunks("", &opts).is_err());
    }
}
