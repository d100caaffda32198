//! Unified-diff parsing

use regex::Regex;

use crate::types::{FileChange, Hunk};

/// Parse raw diff text into structured per-file change records.
///
/// Files appear in output order as they appear in the input. Malformed
/// input never fails: an unparseable `diff --git` header yields a file
/// with an empty path, an unparseable `@@` header opens no hunk, and
/// content lines with no enclosing hunk are dropped.
pub fn parse_diff(input: &str) -> Vec<FileChange> {
    DiffParser::new().parse(input)
}

/// Line-by-line diff scanner with precompiled header patterns.
pub struct DiffParser {
    file_header: Regex,
    hunk_header: Regex,
}

/// Scanner position. A file header closes whatever is open; a hunk header
/// closes the open hunk; everything else either accumulates into the open
/// hunk or is dropped.
enum State {
    BeforeFile,
    InFile(FileChange),
    InHunk(FileChange, Hunk),
}

impl State {
    /// Flush the open hunk and file, as a file boundary would.
    fn finish(self) -> Option<FileChange> {
        match self {
            State::BeforeFile => None,
            State::InFile(file) => Some(file),
            State::InHunk(mut file, hunk) => {
                file.hunks.push(hunk);
                Some(file)
            }
        }
    }
}

impl DiffParser {
    pub fn new() -> Self {
        Self {
            file_header: Regex::new(r"^diff --git a/(.*?) b/(.*?)$").unwrap(),
            hunk_header: Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap(),
        }
    }

    pub fn parse(&self, input: &str) -> Vec<FileChange> {
        let mut files = Vec::new();
        let mut state = State::BeforeFile;

        for line in input.lines() {
            let (next, completed) = self.step(state, line);
            if let Some(file) = completed {
                files.push(file);
            }
            state = next;
        }

        // End of input flushes like a file boundary
        if let Some(file) = state.finish() {
            files.push(file);
        }

        files
    }

    /// Consume one line: the next state, plus the file record the line
    /// completed, if any.
    fn step(&self, state: State, line: &str) -> (State, Option<FileChange>) {
        if line.starts_with("diff --git") {
            // The b/ capture is the post-change path, which keeps the new
            // name for renames. No match leaves the path empty.
            let path = self
                .file_header
                .captures(line)
                .and_then(|caps| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return (State::InFile(FileChange::new(path)), state.finish());
        }

        if is_metadata(line) {
            return (state, None);
        }

        if let Some(caps) = self.hunk_header.captures(line) {
            let file = match state {
                // Hunk header before any file header is dropped
                State::BeforeFile => return (State::BeforeFile, None),
                State::InFile(file) => file,
                State::InHunk(mut file, hunk) => {
                    file.hunks.push(hunk);
                    file
                }
            };
            let hunk = Hunk {
                old_start: range_number(caps.get(1).map(|m| m.as_str())),
                old_lines: caps.get(2).map(|m| m.as_str()).map_or(1, parse_count),
                new_start: range_number(caps.get(3).map(|m| m.as_str())),
                new_lines: caps.get(4).map(|m| m.as_str()).map_or(1, parse_count),
                content: line.to_string(),
            };
            return (State::InHunk(file, hunk), None);
        }

        match state {
            State::InHunk(mut file, mut hunk) => {
                // `+++`/`---` were already consumed as metadata above
                if line.starts_with('+') {
                    file.additions += 1;
                } else if line.starts_with('-') {
                    file.deletions += 1;
                }
                hunk.content.push('\n');
                hunk.content.push_str(line);
                (State::InHunk(file, hunk), None)
            }
            // Content before any hunk header is dropped
            other => (other, None),
        }
    }
}

impl Default for DiffParser {
    fn default() -> Self {
        Self::new()
    }
}

fn range_number(text: Option<&str>) -> u32 {
    text.and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn parse_count(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

/// File metadata lines carry no content for the data model.
fn is_metadata(line: &str) -> bool {
    line.starts_with("index ")
        || line.starts_with("---")
        || line.starts_with("+++")
        || line.starts_with("new file mode")
        || line.starts_with("deleted file mode")
        || line.starts_with("old mode")
        || line.starts_with("new mode")
        || line.starts_with("similarity index")
        || line.starts_with("dissimilarity index")
        || line.starts_with("rename from")
        || line.starts_with("rename to")
        || line.starts_with("copy from")
        || line.starts_with("copy to")
        || line.starts_with("Binary files")
        || line.starts_with("GIT binary patch")
}
