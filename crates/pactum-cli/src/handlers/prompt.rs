//! Prompt command handler

use super::utils::{load_schema, rng};
use crate::cli::{OutputFormat, PromptArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Serialize)]
struct RenderedPrompt<'a> {
    schema: &'a str,
    seed: Option<u64>,
    prompt: String,
}

/// Handle the prompt command
///
/// The preamble comes from `--preamble`, then the declaration, then the config.
#[instrument(skip(config, output), fields(file = %args.declaration.display()))]
pub fn handle_prompt(args: PromptArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.declaration, config)?;
    let _timer = Timer::with_details("render_prompt", schema.name());

    let seed = args.seed.or(config.prompt.seed);
    let preamble = args
        .preamble
        .as_deref()
        .or_else(|| schema.preamble())
        .or(config.prompt.preamble.as_deref());

    let prompt = schema.render_prompt(&mut rng(seed), preamble);
    info!(schema = schema.name(), seed = ?seed, bytes = prompt.len(), "Rendered prompt");

    match output.format() {
        OutputFormat::Human => output.writeln(&prompt),
        _ => output.data(&RenderedPrompt {
            schema: schema.name(),
            seed,
            prompt,
        }),
    }
}
