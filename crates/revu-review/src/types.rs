//! Review result data model
//!
//! These types mirror the JSON shape the provider is prompted to emit,
//! so they derive both `Serialize` and `Deserialize`.

use serde::{Deserialize, Serialize};

/// Final verdict for a set of changes, ordered by severity of outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Approve,
    RequestChanges,
    Comment,
}

impl Assessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Approve => "approve",
            Assessment::RequestChanges => "request_changes",
            Assessment::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Security,
    Performance,
    Style,
    Documentation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Style => "style",
            Category::Documentation => "documentation",
        }
    }
}

/// One finding reported by the reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// The reviewer's output for one chunk, or the merged output for the
/// whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default = "default_assessment")]
    pub overall_assessment: Assessment,
}

fn default_assessment() -> Assessment {
    Assessment::Comment
}

impl ReviewResult {
    /// The fixed result for an empty review run.
    pub fn empty() -> Self {
        Self {
            summary: "No reviewable changes found.".to_string(),
            issues: Vec::new(),
            positives: Vec::new(),
            overall_assessment: Assessment::Approve,
        }
    }

    /// Synthetic placeholder for a chunk whose provider call failed.
    ///
    /// The failure surfaces as a low-severity issue in the merged result
    /// instead of aborting the review.
    pub fn provider_failure(detail: &str) -> Self {
        Self {
            summary: "A portion of this change set could not be reviewed.".to_string(),
            issues: vec![ReviewIssue {
                severity: Severity::Warning,
                category: Category::Documentation,
                title: "Review Error".to_string(),
                description: format!("The provider call for this chunk failed: {detail}"),
                file: None,
                line: None,
                suggestion: None,
            }],
            positives: Vec::new(),
            overall_assessment: Assessment::Comment,
        }
    }
}
