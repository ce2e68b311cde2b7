//! Example command handler

use super::utils::{load_schema, rng};
use crate::cli::ExampleArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::{debug, instrument};

/// Handle the example command
#[instrument(skip(config, output), fields(file = %args.declaration.display()))]
pub fn handle_example(args: ExampleArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.declaration, config)?;
    let seed = args.seed.or(config.prompt.seed);

    let example = schema.example_with_rng(&mut rng(seed));
    debug!(schema = schema.name(), seed = ?seed, "Generated example");

    output.data(&example)
}
