//! Unified-diff parsing and chunking for LLM review context
//!
//! This crate turns raw `git diff` output into structured per-file change
//! records, filters and caps them, and groups the survivors into
//! size-bounded chunks so each downstream review call stays within a
//! provider's context budget.

mod chunker;
mod filter;
mod limit;
mod parser;
mod pipeline;
mod render;
mod types;

pub use chunker::split_into_chunks;
pub use filter::{filter_files, FilterError, FilterSet};
pub use limit::limit_files;
pub use parser::{parse_diff, DiffParser};
pub use pipeline::plan_chunks;
pub use render::render_diff;
pub use types::{Chunk, FileChange, Hunk};
