//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), including the
//! validation verdict and field tables.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use pactum_core::Verdict;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output values
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation verdict
    fn format_verdict(&self, verdict: &Verdict) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_verdict(&self, verdict: &Verdict) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_verdict_human(verdict)),
            _ => self.format(verdict),
        }
    }
}

fn format_verdict_human(verdict: &Verdict) -> String {
    match verdict.messages() {
        None => "valid".to_string(),
        Some((actual, expected)) => format!("invalid\n  Problem:  {}\n  Expected: {}", actual, expected),
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Whether detail lines should be printed
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {} bytes", formatted.len());

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a validation verdict
    pub fn verdict(&mut self, verdict: &Verdict) -> Result<()> {
        let formatted = self.format.format_verdict(verdict)?;

        if self.format != OutputFormat::Human {
            return self.writeln(formatted.trim_end());
        }

        let mut lines = formatted.lines();
        let status = lines.next().unwrap_or_default();
        let status = match (self.use_color, verdict.is_valid()) {
            (true, true) => format!("✓ {}", status).green().to_string(),
            (true, false) => format!("✗ {}", status).red().to_string(),
            (false, _) => status.to_string(),
        };
        self.writeln(&status)?;
        for line in lines {
            self.writeln(line)?;
        }
        Ok(())
    }

    /// Write rows as an aligned table (human format only)
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let render = |cells: Vec<&str>| -> String {
            let last = cells.len().saturating_sub(1);
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.to_string()
                    } else {
                        format!("{:<width$}", cell, width = widths[i])
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let header_line = render(headers.to_vec());
        if self.use_color {
            self.writeln(&header_line.bold().to_string())?;
        } else {
            self.writeln(&header_line)?;
        }
        for row in rows {
            self.writeln(&render(row.iter().map(String::as_str).collect()))?;
        }
        Ok(())
    }
}
