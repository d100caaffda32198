//! Review prompt rendering

use minijinja::{context, Environment};

const REVIEW_TEMPLATE: &str = r#"You are a senior software engineer reviewing a code change.

Review the following unified diff ({{ file_count }} file{% if file_count != 1 %}s{% endif %}).
{% if focus_areas %}
Pay particular attention to: {{ focus_areas | join(", ") }}.
{% endif %}
Respond with a single JSON object and nothing else, using this shape:

{
  "summary": "<one-paragraph summary of the change and its quality>",
  "issues": [
    {
      "severity": "critical|warning|info",
      "category": "bug|security|performance|style|documentation",
      "title": "<short issue title>",
      "description": "<what is wrong and why it matters>",
      "file": "<path or null>",
      "line": <line number or null>,
      "suggestion": "<concrete fix or null>"
    }
  ],
  "positives": ["<things done well>"],
  "overall_assessment": "approve|request_changes|comment"
}

Diff:

```diff
{{ diff }}
```
"#;

/// Render the review prompt for one chunk. Pure function of its inputs.
pub fn render_prompt(
    diff: &str,
    focus_areas: &[String],
    file_count: usize,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("review", REVIEW_TEMPLATE)?;
    let template = env.get_template("review")?;
    template.render(context! { diff, focus_areas, file_count })
}
