//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "fieldarity",
    version,
    about = "Classify field types by how many command-line tokens they consume"
)]
pub struct Cli {
    /// Config file with named type declarations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report the cardinality of each type expression
    Classify {
        #[arg(required = true, value_name = "TYPE")]
        types: Vec<String>,
    },
    /// Plan the exported fields of a declared struct
    Fields {
        #[arg(value_name = "STRUCT")]
        name: String,
    },
    /// Check whether a JSON value is the zero value of a type
    Zero {
        #[arg(value_name = "TYPE")]
        ty: String,
        #[arg(value_name = "JSON", allow_hyphen_values = true)]
        json: String,
    },
    /// Check whether field names are exported
    Exported {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
