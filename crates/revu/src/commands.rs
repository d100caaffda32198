use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use revu_core::{Config, ReviewOptions};
use revu_diff::{plan_chunks, render_diff, Chunk};
use revu_review::{merge_results, render_prompt, ProviderClient, ReviewResult};

use crate::cli::{Cli, Command};
use crate::report;

pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Review {
            file,
            json,
            ignore,
            max_files,
            max_diff_size,
        } => {
            let mut options = config.review_options();
            options.ignore.extend(ignore);
            if let Some(max_files) = max_files {
                options.max_files = max_files;
            }
            if let Some(max_diff_size) = max_diff_size {
                options.max_diff_size = max_diff_size;
            }
            review(&config, &options, file.as_deref(), json).await
        }
        Command::Chunks { file, json } => {
            let options = config.review_options();
            chunks(&options, file.as_deref(), json)
        }
    }
}

fn read_diff(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read diff from stdin")?;
            Ok(input)
        }
    }
}

async fn review(
    config: &Config,
    options: &ReviewOptions,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let diff = read_diff(file)?;
    let chunks = plan_chunks(&diff, options)?;

    let merged = if chunks.is_empty() {
        ReviewResult::empty()
    } else {
        let provider = config
            .provider
            .clone()
            .context("no [provider] configured; add one to .revu.toml or ~/.config/revu/config.toml")?;
        let client = ProviderClient::new(provider);
        review_chunks(&client, &chunks, options).await
    };

    print_result(&merged, json)
}

/// Send each chunk to the provider in submission order. A failed call
/// becomes a synthetic error result so the remaining chunks still run and
/// the merger sees one result per chunk, in order.
async fn review_chunks(
    client: &ProviderClient,
    chunks: &[Chunk],
    options: &ReviewOptions,
) -> ReviewResult {
    let mut results = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        tracing::info!(
            chunk = index + 1,
            total = chunks.len(),
            files = chunk.len(),
            lines = chunk.total_lines,
            "reviewing chunk"
        );

        let diff_text = render_diff(&chunk.files);
        let result = match render_prompt(&diff_text, &options.focus_areas, chunk.len()) {
            Ok(prompt) => client.review(&prompt).await,
            Err(err) => {
                results.push(ReviewResult::provider_failure(&err.to_string()));
                continue;
            }
        };

        match result {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::warn!(chunk = index + 1, error = %err, "provider call failed, continuing");
                results.push(ReviewResult::provider_failure(&err.to_string()));
            }
        }
    }

    merge_results(results)
}

fn print_result(result: &ReviewResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", report::render_markdown(result));
    }
    Ok(())
}

fn chunks(options: &ReviewOptions, file: Option<&Path>, json: bool) -> Result<()> {
    let diff = read_diff(file)?;
    let chunks = plan_chunks(&diff, options)?;

    if json {
        let layout: Vec<serde_json::Value> = chunks
            .iter()
            .map(|chunk| {
                serde_json::json!({
                    "total_lines": chunk.total_lines,
                    "files": chunk
                        .files
                        .iter()
                        .map(|f| serde_json::json!({
                            "path": f.path,
                            "additions": f.additions,
                            "deletions": f.deletions,
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    if chunks.is_empty() {
        println!("nothing to review");
        return Ok(());
    }

    for (index, chunk) in chunks.iter().enumerate() {
        println!(
            "chunk {} ({} lines, {} files)",
            index + 1,
            chunk.total_lines,
            chunk.len()
        );
        for file in &chunk.files {
            println!("  {} (+{} -{})", file.path, file.additions, file.deletions);
        }
    }
    Ok(())
}
