//! Size-bounded chunk partitioning

use crate::types::{Chunk, FileChange};

/// Group files into chunks whose total change size stays within
/// `max_chunk_size` lines.
///
/// Greedy bin-packing in input order: every file lands in exactly one
/// chunk and order is preserved within and across chunks. A single file
/// larger than the budget is never split across chunks; it gets a chunk
/// of its own and may exceed the budget alone.
pub fn split_into_chunks(files: Vec<FileChange>, max_chunk_size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Chunk::default();

    for file in files {
        let size = file.change_size();

        if size > max_chunk_size {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let mut oversized = Chunk::default();
            oversized.push(file);
            tracing::debug!(
                path = %oversized.files[0].path,
                lines = oversized.total_lines,
                max_chunk_size,
                "oversized file gets its own chunk"
            );
            chunks.push(oversized);
            continue;
        }

        if !current.is_empty() && current.total_lines + size > max_chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(file);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, size: usize) -> FileChange {
        FileChange {
            path: path.to_string(),
            additions: size,
            deletions: 0,
            hunks: Vec::new(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(split_into_chunks(Vec::new(), 200).is_empty());
    }

    #[test]
    fn test_all_fit_in_one_chunk() {
        let chunks = split_into_chunks(vec![file("a", 50), file("b", 60)], 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[0].total_lines, 110);
    }

    #[test]
    fn test_oversized_file_alone() {
        // Sizes 150, 300, 225 with a 200-line budget: the 300-line file
        // must occupy a chunk by itself
        let chunks = split_into_chunks(
            vec![file("a", 150), file("b", 300), file("c", 225)],
            200,
        );

        assert!(chunks.len() >= 2);
        let lone = chunks
            .iter()
            .find(|c| c.files.iter().any(|f| f.path == "b"))
            .unwrap();
        assert_eq!(lone.len(), 1);
        assert_eq!(lone.total_lines, 300);

        // 225 also exceeds the budget, so it is alone too
        let last = chunks
            .iter()
            .find(|c| c.files.iter().any(|f| f.path == "c"))
            .unwrap();
        assert_eq!(last.len(), 1);
    }

    #[test]
    fn test_every_file_in_exactly_one_chunk() {
        let input: Vec<FileChange> = (0..17).map(|i| file(&format!("f{i}"), 37)).collect();
        let chunks = split_into_chunks(input.clone(), 100);

        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, input.len());

        // Concatenated chunk contents equal the input in order
        let flattened: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.files.iter().map(|f| f.path.as_str()))
            .collect();
        let expected: Vec<&str> = input.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_multi_file_chunks_respect_budget() {
        let input: Vec<FileChange> = (0..10).map(|i| file(&format!("f{i}"), 80)).collect();
        let chunks = split_into_chunks(input, 200);

        for chunk in &chunks {
            if chunk.len() > 1 {
                assert!(chunk.total_lines <= 200);
            }
        }
    }

    #[test]
    fn test_total_lines_is_consistent() {
        let chunks = split_into_chunks(vec![file("a", 10), file("b", 190), file("c", 5)], 200);
        for chunk in &chunks {
            let recomputed: usize = chunk.files.iter().map(|f| f.change_size()).sum();
            assert_eq!(chunk.total_lines, recomputed);
        }
    }

    #[test]
    fn test_zero_budget_degenerates() {
        // Never fails: every non-empty file becomes its own chunk
        let chunks = split_into_chunks(vec![file("a", 1), file("b", 2)], 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1);
        assert_eq!(chunks[1].len(), 1);
    }

    #[test]
    fn test_exact_fit_stays_in_chunk() {
        let chunks = split_into_chunks(vec![file("a", 120), file("b", 80)], 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].total_lines, 200);
    }
}
