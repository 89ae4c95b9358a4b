//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// apiref - API reference from an OpenAPI document
///
/// Lists the schemas and endpoints of an OpenAPI 3 document and shows, for
/// each schema, a synthesized example value and a short type description.
#[derive(Parser, Debug)]
#[command(
    name = "apiref",
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
    #[arg(short, long, global = true, env = "APIREF_CONFIG")]
    pub config: Option<PathBuf>,

    /// OpenAPI document to read: a local file or an http(s) URL
    #[arg(short, long, global = true, env = "APIREF_API", value_name = "PATH_OR_URL")]
    pub api: Option<String>,

    /// Output format for results [default: human, or output.format from the config]
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
    /// List the component schemas with their type
    Schemas(SchemasArgs),

    /// Show a synthesized example for a schema
    Example(ExampleArgs),

    /// Show the type description of a schema
    Type(TypeArgs),

    /// List the operations of the API
    Endpoints(EndpointsArgs),

    /// Show parameters, request body and responses of one operation
    Endpoint(EndpointArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the schemas command
#[derive(Parser, Debug)]
pub struct SchemasArgs {
    /// Only list schemas whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the example command
#[derive(Parser, Debug)]
pub struct ExampleArgs {
    /// Component schema name
    #[arg(value_name = "SCHEMA")]
    pub schema: String,
}

/// Arguments for the type command
#[derive(Parser, Debug)]
pub struct TypeArgs {
    /// Component schema name
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Emit HTML with links to schema pages
    #[arg(long)]
    pub markup: bool,

    /// Link template for --markup, `{name}` is replaced by the schema name
    #[arg(long, value_name = "TEMPLATE")]
    pub link_template: Option<String>,
}

/// Arguments for the endpoints command
#[derive(Parser, Debug)]
pub struct EndpointsArgs {
    /// Only list operations using this HTTP method
    #[arg(short, long, value_enum)]
    pub method: Option<Method>,
}

/// Arguments for the endpoint command
#[derive(Parser, Debug)]
pub struct EndpointArgs {
    /// Operation id (or the id derived from method and path)
    #[arg(value_name = "OPERATION_ID")]
    pub operation_id: String,

    /// Leave out request and response examples
    #[arg(long)]
    pub no_examples: bool,
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
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// HTTP methods operations are listed under
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl From<Method> for apiref_schema::loader::HttpMethod {
    fn from(method: Method) -> Self {
        use apiref_schema::loader::HttpMethod;
        match method {
            Method::Get => HttpMethod::Get,
            Method::Put => HttpMethod::Put,
            Method::Post => HttpMethod::Post,
            Method::Delete => HttpMethod::Delete,
            Method::Patch => HttpMethod::Patch,
        }
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
