use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use placematch_cli::pipeline::{default_output_path, process_rows};
use placematch_ingest::{load_registry, read_queries, write_results, write_stats};
use placematch_match::{MatchConfig, MatchTrace, Matcher, RegistryIndex};

use crate::cli::{LookupArgs, RunArgs};
use crate::types::RunSummary;

pub fn run_batch(args: &RunArgs) -> Result<RunSummary> {
    let run_start = Instant::now();
    let run_span = info_span!("run", input = %args.input.display());
    let _run_guard = run_span.enter();

    let config = args.matching.to_config();
    let index = build_index(&args.registry)?;
    let matcher = Matcher::new(&index, config).context("invalid matching configuration")?;

    let queries = read_queries(&args.input)
        .with_context(|| format!("read input {}", args.input.display()))?;

    let match_start = Instant::now();
    let outcome = {
        let _span = info_span!("match", row_count = queries.len()).entered();
        process_rows(&matcher, &queries)
    };
    info!(
        row_count = outcome.stats.total_rows,
        found = outcome.stats.total_found,
        not_found = outcome.stats.total_not_found,
        internal_error = outcome.stats.total_internal_error,
        duration_ms = match_start.elapsed().as_millis(),
        "matching complete"
    );

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_results(&output_path, &outcome.rows)
        .with_context(|| format!("write results {}", output_path.display()))?;
    if let Some(stats_path) = &args.stats {
        write_stats(stats_path, &outcome.stats)
            .with_context(|| format!("write stats {}", stats_path.display()))?;
    }
    info!(output = %output_path.display(), "results written");

    Ok(RunSummary {
        registry_records: index.len(),
        registry_keys: index.group_count(),
        output_path,
        stats_path: args.stats.clone(),
        stats: outcome.stats,
        elapsed: run_start.elapsed(),
    })
}

pub fn run_lookup(args: &LookupArgs) -> Result<(MatchConfig, MatchTrace)> {
    let config = args.matching.to_config();
    let index = build_index(&args.registry)?;
    let matcher = Matcher::new(&index, config).context("invalid matching configuration")?;
    let trace = matcher
        .explain(&args.name)
        .with_context(|| format!("resolve {:?}", args.name))?;
    Ok((matcher.config().clone(), trace))
}

fn build_index(path: &Path) -> Result<RegistryIndex> {
    let _span = info_span!("registry", path = %path.display()).entered();
    let load_start = Instant::now();
    let records =
        load_registry(path).with_context(|| format!("load registry {}", path.display()))?;
    let index = RegistryIndex::new(records);
    let unnamed = index
        .records()
        .iter()
        .filter(|record| record.name.is_empty())
        .count();
    if unnamed > 0 {
        warn!(unnamed, "registry records without a usable name share the empty key");
    }
    info!(
        record_count = index.len(),
        key_count = index.group_count(),
        duration_ms = load_start.elapsed().as_millis(),
        "registry loaded"
    );
    Ok(index)
}
