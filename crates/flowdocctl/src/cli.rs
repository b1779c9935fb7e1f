use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use flowdoc_core::{ActivityRole, ComplexityRules, Summarizer};

use crate::commands;
use crate::output::{OutputFormat, SummaryOutput};

/// flowdocctl - plain-language summaries of workflow exports
#[derive(Parser, Debug)]
#[command(name = "flowdocctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Complexity rules file (YAML) overriding the built-in keyword tables
    ///
    /// Keys (all optional):
    /// - max_simple_activities
    /// - advanced_fields
    /// - advanced_handlers
    #[arg(long, global = true, env = "FLOWDOC_RULES")]
    pub rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Disable colored text output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log engine decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a workflow export: startup, fields, activities and complexity
    Describe {
        /// Workflow export (JSON), or - for stdin
        file: String,

        /// Description to show instead of the one in the export
        #[arg(long)]
        description: Option<String>,
    },

    /// List the field types used by the workflow's forms
    Fields {
        /// Workflow export (JSON), or - for stdin
        file: String,
    },

    /// List the workflow's activities with their roles
    Activities {
        /// Workflow export (JSON), or - for stdin
        file: String,

        /// Only show activities with this role (fill, approval, data-delivery, empty)
        #[arg(long)]
        role: Option<ActivityRole>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: commands::completion::Shell,
    },

    /// Show version information
    Version,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        let output = SummaryOutput::new(self.output).with_colors(!self.no_color);

        match self.command {
            Commands::Describe { file, description } => {
                let summarizer = Summarizer::new(load_rules(self.rules.as_deref())?);
                commands::describe::execute(&file, description.as_deref(), &summarizer, &output)
            }
            Commands::Fields { file } => commands::fields::execute(&file, &output),
            Commands::Activities { file, role } => {
                commands::activities::execute(&file, role, &output)
            }
            Commands::Completion { shell } => commands::completion::execute(shell),
            Commands::Version => {
                println!("flowdocctl {}", flowdoc_core::VERSION);
                Ok(())
            }
        }
    }
}

/// Load complexity rules, falling back to the built-in tables
fn load_rules(path: Option<&Path>) -> anyhow::Result<ComplexityRules> {
    let Some(path) = path else {
        return Ok(ComplexityRules::default());
    };

    let rules = ComplexityRules::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load complexity rules {:?}: {}", path, e))?;

    tracing::info!("Loaded complexity rules from {:?}", path);
    Ok(rules)
}
