//! Merging per-chunk review results

use std::collections::HashSet;

use crate::types::{Assessment, ReviewResult};

/// Fold the per-chunk results into one.
///
/// Summaries and issues concatenate in input order. Positives are
/// de-duplicated, keeping first occurrence. The most severe verdict wins:
/// `request_changes` beats `comment` beats `approve`.
pub fn merge_results(results: Vec<ReviewResult>) -> ReviewResult {
    if results.is_empty() {
        return ReviewResult::empty();
    }

    let mut results = results;
    if results.len() == 1 {
        return results.remove(0);
    }

    let mut summary_parts = Vec::with_capacity(results.len());
    let mut issues = Vec::new();
    let mut positives = Vec::new();
    let mut seen = HashSet::new();
    let mut overall = Assessment::Approve;

    for result in results {
        if !result.summary.is_empty() {
            summary_parts.push(result.summary);
        }
        issues.extend(result.issues);
        for positive in result.positives {
            if seen.insert(positive.clone()) {
                positives.push(positive);
            }
        }
        overall = escalate(overall, result.overall_assessment);
    }

    ReviewResult {
        summary: summary_parts.join(" "),
        issues,
        positives,
        overall_assessment: overall,
    }
}

fn escalate(current: Assessment, next: Assessment) -> Assessment {
    match (current, next) {
        (Assessment::RequestChanges, _) | (_, Assessment::RequestChanges) => {
            Assessment::RequestChanges
        }
        (Assessment::Comment, _) | (_, Assessment::Comment) => Assessment::Comment,
        _ => Assessment::Approve,
    }
}
