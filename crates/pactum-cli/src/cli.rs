//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Pactum CLI - typed data contracts for LLM output
///
/// Turns a schema declaration into an LLM prompt with rules and examples,
/// and checks model output against the same declaration.
#[derive(Parser, Debug)]
#[command(
    name = "pactum",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PACTUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format, then human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the LLM prompt for a schema declaration
    Prompt(PromptArgs),

    /// Generate an example object that satisfies the schema
    Example(ExampleArgs),

    /// Validate a JSON or YAML document against the schema
    Validate(ValidateArgs),

    /// Render a repair prompt for a document that failed validation
    Repair(RepairArgs),

    /// List the fields of a schema and the rule each one follows
    Inspect(InspectArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the prompt command
#[derive(Parser, Debug)]
pub struct PromptArgs {
    /// Path to the schema declaration (JSON or YAML)
    #[arg(value_name = "DECLARATION")]
    pub declaration: PathBuf,

    /// Seed for reproducible examples
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Text placed before the prompt, replacing the declared preamble
    #[arg(short, long)]
    pub preamble: Option<String>,
}

/// Arguments for the example command
#[derive(Parser, Debug)]
pub struct ExampleArgs {
    /// Path to the schema declaration (JSON or YAML)
    #[arg(value_name = "DECLARATION")]
    pub declaration: PathBuf,

    /// Seed for a reproducible example
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the schema declaration (JSON or YAML)
    #[arg(value_name = "DECLARATION")]
    pub declaration: PathBuf,

    /// Path to the document to check (JSON or YAML)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
}

/// Arguments for the repair command
#[derive(Parser, Debug)]
pub struct RepairArgs {
    /// Path to the schema declaration (JSON or YAML)
    #[arg(value_name = "DECLARATION")]
    pub declaration: PathBuf,

    /// Path to the document to repair (JSON or YAML)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to the schema declaration (JSON or YAML)
    #[arg(value_name = "DECLARATION")]
    pub declaration: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a format name as written in a config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Inspect(InspectArgs {
                declaration: PathBuf::from("schema.yaml"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli { quiet: true, ..cli };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_prompt_args() {
        let cli = Cli::parse_from([
            "pactum",
            "prompt",
            "schema.yaml",
            "--seed",
            "7",
            "--preamble",
            "You are a librarian.",
        ]);
        match cli.command {
            Commands::Prompt(args) => {
                assert_eq!(args.declaration, PathBuf::from("schema.yaml"));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.preamble.as_deref(), Some("You are a librarian."));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pactum", "validate", "s.yaml", "d.json", "-o", "json-pretty", "-vv"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pactum", "-q", "-v", "inspect", "s.yaml"]).is_err());
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("yaml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_name("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::from_name("xml"), None);
    }
}
