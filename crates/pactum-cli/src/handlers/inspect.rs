//! Inspect command handler

use super::utils::load_schema;
use crate::cli::{InspectArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use pactum_core::{Rule, Schema};
use serde::Serialize;
use tracing::instrument;

#[derive(Serialize)]
struct SchemaReport<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<&'a str>,
    deny_unknown_fields: bool,
    fields: Vec<FieldReport<'a>>,
    additional_examples: usize,
}

#[derive(Serialize)]
struct FieldReport<'a> {
    name: &'a str,
    required: bool,
    rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

impl<'a> SchemaReport<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            name: schema.name(),
            header: schema.header(),
            deny_unknown_fields: schema.denies_unknown_fields(),
            fields: schema
                .fields()
                .iter()
                .map(|field| FieldReport {
                    name: field.name(),
                    required: field.is_required(),
                    rule: field.rule().describe(),
                    note: field.note(),
                })
                .collect(),
            additional_examples: schema.additional_examples().len(),
        }
    }
}

/// Handle the inspect command
#[instrument(skip(config, output), fields(file = %args.declaration.display()))]
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.declaration, config)?;
    let report = SchemaReport::new(&schema);

    if output.format() != OutputFormat::Human {
        return output.data(&report);
    }

    let title = match report.header {
        Some(header) => format!("{} ({})", report.name, header),
        None => report.name.to_string(),
    };
    output.section(&title)?;

    let rows: Vec<Vec<String>> = report
        .fields
        .iter()
        .map(|field| {
            vec![
                field.name.to_string(),
                if field.required { "yes" } else { "no" }.to_string(),
                field.rule.clone(),
                field.note.unwrap_or_default().to_string(),
            ]
        })
        .collect();
    output.table(&["FIELD", "REQUIRED", "RULE", "NOTE"], &rows)?;

    if report.deny_unknown_fields {
        output.info("Unknown fields are rejected")?;
    }
    if report.additional_examples > 0 {
        output.info(&format!(
            "{} additional example(s) declared",
            report.additional_examples
        ))?;
    }

    if output.is_verbose() {
        output.section("Rules")?;
        for line in schema.rule_lines() {
            output.writeln(&line)?;
        }
    }

    Ok(())
}
