//! Repair command handler

use super::utils::{load_data, load_schema};
use crate::cli::{OutputFormat, RepairArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use pactum_core::Verdict;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct RepairRequest<'a> {
    schema: &'a str,
    verdict: &'a Verdict,
    prompt: String,
}

/// Handle the repair command
#[instrument(skip(config, output), fields(file = %args.declaration.display(), data = %args.data.display()))]
pub fn handle_repair(args: RepairArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.declaration, config)?;
    let data = load_data(&args.data)?;

    let verdict = schema.validate_with_error(&data);
    if verdict.is_valid() {
        output.warning("Document already satisfies the schema; the repair prompt has no problem section")?;
    }

    let prompt = schema.repair_prompt(&data);
    debug!(schema = schema.name(), valid = verdict.is_valid(), "Rendered repair prompt");

    match output.format() {
        OutputFormat::Human => output.writeln(&prompt),
        _ => output.data(&RepairRequest {
            schema: schema.name(),
            verdict: &verdict,
            prompt,
        }),
    }
}
