//! CLI module for bridgegen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate <AST.json>` - Generate C++ artifacts and write them to an output root
//! - `check <AST.json>` - Validate and generate in memory, report the artifact count
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::backend::GeneratorConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// C++ / C++/WinRT bridge generator
#[derive(Parser, Debug)]
#[command(name = "bridgegen")]
#[command(version = VERSION)]
#[command(about = "Generate C++ declarations and C++/WinRT bridges from a resolved IDL document", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate artifacts and write them below an output directory
    Generate {
        /// Resolved document (JSON)
        #[arg(value_name = "AST.json")]
        input: PathBuf,
        /// Output root
        #[arg(short = 'o', long = "out-dir", value_name = "DIR", default_value = "generated")]
        out_dir: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
        /// Write the list of produced files here
        #[arg(long = "list-out", value_name = "FILE")]
        list_out: Option<PathBuf>,
        /// Print the paths that would be written without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a document and report how many artifacts it would produce
    Check {
        /// Resolved document (JSON)
        #[arg(value_name = "AST.json")]
        input: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Generator options shared by every subcommand. Unset flags keep the defaults of [`GeneratorConfig`].
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Native C++ namespace (`a::b`, empty for none)
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,
    /// Component namespace, dot-separated (`Contoso.Geometry`)
    #[arg(long, value_name = "NS")]
    pub component_namespace: Option<String>,
    /// Namespace of the marshalling support library
    #[arg(long, value_name = "NS")]
    pub support_namespace: Option<String>,
    /// Include path of the marshalling support header
    #[arg(long, value_name = "PATH")]
    pub support_include: Option<String>,
    /// Prefix for quoted includes of generated headers
    #[arg(long, value_name = "P")]
    pub include_prefix: Option<String>,
    /// Header file extension
    #[arg(long, value_name = "E")]
    pub header_ext: Option<String>,
    /// Translation unit file extension
    #[arg(long, value_name = "E")]
    pub source_ext: Option<String>,
    /// Header directory below the output root
    #[arg(long, value_name = "DIR")]
    pub header_dir: Option<PathBuf>,
    /// Translation unit directory below the output root
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,
    /// Do not emit `std::hash` specializations for enums
    #[arg(long)]
    pub no_hash_workaround: bool,
    /// Suffix for the generated type of extensible records
    #[arg(long, value_name = "WORD")]
    pub ext_suffix: Option<String>,
}

impl ConfigArgs {
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new().with_hash_enum_workaround(!self.no_hash_workaround);
        if let Some(ns) = &self.namespace {
            config = config.with_namespace(ns);
        }
        if let Some(ns) = &self.component_namespace {
            config = config.with_component_namespace(ns);
        }
        if let Some(ns) = &self.support_namespace {
            config.support_namespace = ns.clone();
        }
        if let Some(include) = &self.support_include {
            config.support_include = include.clone();
        }
        if let Some(prefix) = &self.include_prefix {
            config = config.with_include_prefix(prefix);
        }
        if let Some(ext) = &self.header_ext {
            config.header_ext = ext.clone();
        }
        if let Some(ext) = &self.source_ext {
            config.source_ext = ext.clone();
        }
        if let Some(dir) = &self.header_dir {
            config.header_out = dir.clone();
        }
        if let Some(dir) = &self.source_dir {
            config.source_out = dir.clone();
        }
        if let Some(suffix) = &self.ext_suffix {
            config = config.with_ext_suffix(suffix);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            input,
            out_dir,
            config,
            list_out,
            dry_run,
        } => commands::generate(
            &input,
            &out_dir,
            &config.to_config(),
            list_out.as_deref(),
            dry_run,
        ),
        Command::Check { input, config } => commands::check(&input, &config.to_config()),
    }
}

// ============================================================================
// Tests
// ============================================================================
