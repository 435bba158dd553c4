//! The load, index, select, write sequence.

use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::output;
use crate::select::select;
use crate::tree::{ChildIndex, count_roots};

/// Counts describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records that parsed.
    pub loaded: usize,
    /// Records without a resolvable parent.
    pub roots: usize,
    /// Records matching the filter directly.
    pub matched: usize,
    /// Records written, or that would be written on a dry run.
    pub written: usize,
}

/// Runs the whole extraction and writes the output file.
#[instrument(skip_all, fields(input = %config.input_path.display(), output = %config.output_path.display()))]
pub fn run(config: &Config) -> Result<Summary, Error> {
    execute(config, true)
}

/// Same as [`run`] but leaves the output file alone.
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn dry_run(config: &Config) -> Result<Summary, Error> {
    execute(config, false)
}

fn execute(config: &Config, write: bool) -> Result<Summary, Error> {
    config.validate()?;

    let dataset = Dataset::open(&config.input_path)?;
    let children = ChildIndex::build(&dataset);
    debug!(parents = children.parents(), "indexed children");

    let selection = select(&dataset, &children, &config.filter);
    let retained = selection.records(&dataset);

    let written = if write {
        output::write_to_path(&config.output_path, retained)?
    } else {
        retained.count()
    };

    let summary = Summary {
        loaded: dataset.len(),
        roots: count_roots(&dataset),
        matched: selection.matched(),
        written,
    };
    info!(
        loaded = summary.loaded,
        matched = summary.matched,
        written = summary.written,
        "extraction finished"
    );
    Ok(summary)
}
