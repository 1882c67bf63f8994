use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Validator - Heuristic validation and linting for SQL statements
#[derive(Parser, Debug)]
#[command(name = "sql-validator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate SQL statements
    Validate {
        /// SQL text to validate inline
        #[arg(long, conflicts_with = "queries")]
        sql: Option<String>,

        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        queries: Option<PathBuf>,

        /// Path to schema DDL file for existence checking
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Check table and column existence against the schema
        #[arg(long)]
        check_existence: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text", env = "SQL_VALIDATOR_FORMAT")]
        output_format: Format,

        /// Enable verbose output with detector identifiers
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
