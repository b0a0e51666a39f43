//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--store <dir>`: Store root (overrides `$MINIONS_STORE` and config)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Skills - agent skill definitions, assignments and results
#[derive(Parser, Debug)]
#[command(name = "skills")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store root directory [default: .minions]
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show project info, store location and registered types
    Info,

    /// Inspect registered record types
    Types {
        #[command(subcommand)]
        action: TypesAction,
    },

    /// Create a record
    #[command(
        name = "create",
        long_about = "Create a record of the given type.\n\n\
            Fields come from --data (inline JSON) or --file (a JSON file). They \
            are stored as given: create does not check them against the type's \
            schema. Run 'skills validate' on the written file to check it.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Create a skill definition with inline fields
    skills create skill-definition -d '{\"name\": \"summarize\", \"isActive\": true}'

    # Create from a JSON file
    skills create skill-result -f result.json

    # Shortcut flags for common fields
    skills create skill-definition -t summarize -s draft"
    )]
    Create {
        /// Type slug (see 'skills types list')
        #[arg(value_name = "TYPE")]
        type_slug: String,

        #[command(flatten)]
        payload: PayloadArgs,

        /// Set the title (the 'title' field if declared, otherwise 'name')
        #[arg(short, long)]
        title: Option<String>,

        /// Set the 'status' field
        #[arg(short, long)]
        status: Option<String>,
    },

    /// List records, optionally of one type
    #[command(name = "list", visible_alias = "ls")]
    List {
        /// Type slug to list (defaults to every type)
        #[arg(value_name = "TYPE")]
        type_slug: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a record by id
    Show {
        /// Record id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge fields into a record
    #[command(
        name = "update",
        long_about = "Merge fields into an existing record.\n\n\
            Given keys overwrite existing values and all other fields are kept. \
            The record's id, type and creation time never change.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bump a version
    skills update <id> -d '{\"version\": \"2.0.0\"}'

    # Change status only
    skills update <id> -s active"
    )]
    Update {
        /// Record id
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,

        /// Set the 'status' field
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a record (soft by default)
    #[command(
        name = "delete",
        long_about = "Delete a record.\n\n\
            By default the record is kept and its 'status' field is set to \
            'cancelled'. With --hard the file is removed."
    )]
    Delete {
        /// Record id
        id: String,

        /// Remove the file instead of marking it cancelled
        #[arg(long)]
        hard: bool,
    },

    /// Validate a record file against its type's schema
    #[command(
        name = "validate",
        long_about = "Validate a JSON file against its type's schema.\n\n\
            The file must have a 'type' key naming a registered type and a \
            'fields' object. Stored record files have this shape. Exits with \
            status 1 if any field is missing, unknown or of the wrong kind.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check a stored record
    skills validate .minions/skill-definition/<id>.json

    # Machine-readable findings
    skills validate draft.json --json"
    )]
    Validate {
        /// JSON file with 'type' and 'fields' keys
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show record counts per type
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    skills config list

    # Point every command at a shared store
    skills config set store.root /srv/minions"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    skills completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    skills completion zsh >> ~/.zshrc

    # Fish
    skills completion fish > ~/.config/fish/completions/skills.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Field data source shared by create and update.
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// Fields as inline JSON
    #[arg(short, long, value_name = "JSON", conflicts_with = "file")]
    pub data: Option<String>,

    /// Fields from a JSON file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Types subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TypesAction {
    /// List registered types
    #[command(visible_alias = "ls")]
    List,
    /// Show a type's schema
    Show {
        /// Type slug
        slug: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
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
    fn data_and_file_conflict() {
        let result = Cli::try_parse_from([
            "skills",
            "create",
            "skill-result",
            "-d",
            "{}",
            "-f",
            "fields.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_store_after_subcommand() {
        let cli = Cli::try_parse_from(["skills", "stats", "--store", "/tmp/s"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s")));
        assert!(matches!(cli.command, Command::Stats { json: false }));
    }

    #[test]
    fn list_alias() {
        let cli = Cli::try_parse_from(["skills", "ls", "skill-result"]).unwrap();
        match cli.command {
            Command::List { type_slug, .. } => {
                assert_eq!(type_slug.as_deref(), Some("skill-result"))
            }
            other => panic!("expected List, got {:?}", other),
        }
    }
}
