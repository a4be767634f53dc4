use crate::commands::{Command, OutputFormat};
use crate::errors::{CliError, CliResult};
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "faasr")]
#[command(about = "Validate FaaSr workflow graphs and resolve action predecessors")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        env = "FAASR_WORKFLOW_FILE",
        help = "Path to the workflow JSON file"
    )]
    pub workflow_file: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(
        long,
        global = true,
        help = "Log filter directives, e.g. faasr_workflow_graph=debug (overrides --level and RUST_LOG)"
    )]
    pub log_filter: Option<String>,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Check the workflow for cycles and unreachable actions")]
    Check,
    #[command(about = "Resolve the predecessors that must finish before an action runs")]
    Predecessors {
        #[arg(
            long,
            short = 'a',
            help = "Action to resolve (defaults to FunctionInvoke)"
        )]
        action: Option<String>,
        #[arg(long, help = "Output format", default_value = "text", value_enum)]
        format: OutputFormat,
    },
}

impl Cli {
    /// Log format after applying the `--json` shorthand.
    pub fn tracing_format(&self) -> TracingFormat {
        if self.json {
            TracingFormat::Json
        } else {
            self.log_format
        }
    }

    /// Convert parsed arguments into an executable command.
    pub fn into_command(self) -> CliResult<Command> {
        let workflow_file = self.workflow_file.ok_or(CliError::MissingWorkflowFile)?;
        Ok(match self.command {
            Commands::Check => Command::Check { workflow_file },
            Commands::Predecessors { action, format } => Command::Predecessors {
                workflow_file,
                action,
                format,
            },
        })
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
