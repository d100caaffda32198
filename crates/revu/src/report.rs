//! Markdown rendering for the merged review result

use revu_review::{ReviewIssue, ReviewResult, Severity};

const SEVERITY_ORDER: &[Severity] = &[Severity::Critical, Severity::Warning, Severity::Info];

pub fn render_markdown(result: &ReviewResult) -> String {
    let mut out = String::new();

    out.push_str("# Code Review\n\n");
    out.push_str(&format!(
        "_Generated {}_\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!(
        "**Assessment:** {}\n\n",
        assessment_label(result)
    ));

    if !result.summary.is_empty() {
        out.push_str("## Summary\n\n");
        out.push_str(&result.summary);
        out.push_str("\n\n");
    }

    if !result.issues.is_empty() {
        out.push_str("## Issues\n\n");
        for severity in SEVERITY_ORDER {
            for issue in result.issues.iter().filter(|i| i.severity == *severity) {
                render_issue(&mut out, issue);
            }
        }
    }

    if !result.positives.is_empty() {
        out.push_str("## What looks good\n\n");
        for positive in &result.positives {
            out.push_str(&format!("- {}\n", positive));
        }
        out.push('\n');
    }

    out
}

fn assessment_label(result: &ReviewResult) -> &'static str {
    use revu_review::Assessment;
    match result.overall_assessment {
        Assessment::Approve => "✅ Approve",
        Assessment::RequestChanges => "🛑 Request changes",
        Assessment::Comment => "💬 Comment",
    }
}

fn render_issue(out: &mut String, issue: &ReviewIssue) {
    let location = match (&issue.file, issue.line) {
        (Some(file), Some(line)) => format!(" — `{}:{}`", file, line),
        (Some(file), None) => format!(" — `{}`", file),
        _ => String::new(),
    };
    out.push_str(&format!(
        "- **{}** ({}/{}){}\n",
        issue.title,
        issue.severity.as_str(),
        issue.category.as_str(),
        location
    ));
    if !issue.description.is_empty() {
        out.push_str(&format!("  {}\n", issue.description));
    }
    if let Some(suggestion) = &issue.suggestion {
        out.push_str(&format!("  Suggestion: {}\n", suggestion));
    }
    out.push('\n');
}
