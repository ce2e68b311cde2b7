//! Validate command handler

use super::utils::{load_data, load_schema};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{info, instrument, warn};

/// Handle the validate command
///
/// Prints the verdict and fails with [`Error::Invalid`] when the document
/// does not satisfy the schema.
#[instrument(skip(config, output), fields(file = %args.declaration.display(), data = %args.data.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.declaration, config)?;
    let data = load_data(&args.data)?;
    output.info(&format!(
        "Validating {} against {}",
        args.data.display(),
        schema.name()
    ))?;

    let verdict = {
        let _timer = Timer::with_details("validation", schema.name());
        schema.validate_with_error(&data)
    };
    output.verdict(&verdict)?;

    match verdict.messages() {
        None => {
            info!(schema = schema.name(), "Document is valid");
            Ok(())
        }
        Some((actual, _)) => {
            warn!(schema = schema.name(), problem = actual, "Document is invalid");
            Err(Error::Invalid {
                schema: schema.name().to_string(),
            })
        }
    }
}
