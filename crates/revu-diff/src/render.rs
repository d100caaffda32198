//! Diff reconstruction for chunk submission

use crate::types::FileChange;

/// Serialize file records back into unified-diff text.
///
/// Emits a synthetic `diff --git` header plus `---`/`+++` path markers per
/// file, then each hunk's stored content verbatim. Index hashes and
/// similarity metadata from the source diff are not reconstructed; the
/// output is review context, not a byte-identical round trip.
pub fn render_diff(files: &[FileChange]) -> String {
    let mut out = String::new();

    for file in files {
        out.push_str(&format!("diff --git a/{0} b/{0}\n", file.path));
        out.push_str(&format!("--- a/{}\n", file.path));
        out.push_str(&format!("+++ b/{}\n", file.path));
        for hunk in &file.hunks {
            out.push_str(&hunk.content);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_diff;

    #[test]
    fn test_empty_input() {
        assert_eq!(render_diff(&[]), "");
    }

    #[test]
    fn test_rendered_shape() {
        let source = r#"diff --git a/src/lib.rs b/src/lib.rs
index 1234567..abcdefg 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,4 @@
 fn existing() {}
+fn added() {}
 fn other() {}
"#;
        let files = parse_diff(source);
        let rendered = render_diff(&files);

        assert!(rendered.starts_with("diff --git a/src/lib.rs b/src/lib.rs\n"));
        assert!(rendered.contains("--- a/src/lib.rs\n"));
        assert!(rendered.contains("+++ b/src/lib.rs\n"));
        assert!(rendered.contains("@@ -1,3 +1,4 @@"));
        assert!(rendered.contains("+fn added() {}"));
        // Lossy round trip: the index line is not reconstructed
        assert!(!rendered.contains("index 1234567"));
    }

    #[test]
    fn test_reparse_preserves_counts() {
        let source = r#"diff --git a/a.rs b/a.rs
--- a/a.rs
+++ b/a.rs
@@ -1,2 +1,3 @@
 one
+two
-three
@@ -9,1 +10,2 @@
+four
diff --git a/b.rs b/b.rs
--- a/b.rs
+++ b/b.rs
@@ -1 +1 @@
-five
+six
"#;
        let files = parse_diff(source);
        let reparsed = parse_diff(&render_diff(&files));

        assert_eq!(files.len(), reparsed.len());
        for (a, b) in files.iter().zip(reparsed.iter()) {
            assert_eq!(a.path, b.path);
            assert_eq!(a.additions, b.additions);
            assert_eq!(a.deletions, b.deletions);
            assert_eq!(a.hunks, b.hunks);
        }
    }
}
