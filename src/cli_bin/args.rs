//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "personote",
    version,
    about = "Person notes, contact import and batch front matter edits for Markdown vaults",
    long_about = "personote keeps a folder of Markdown notes about people. It creates notes \
                  from a template, imports VCF contact cards as notes, and applies one \
                  property edit to the front matter of many selected notes at once."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (default: .personote.json in the vault)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Per-run overrides of the stored settings
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Template note path inside the vault
    #[arg(long, global = true, value_name = "PATH")]
    pub template: Option<String>,

    /// Contacts (VCF) file path inside the vault
    #[arg(long, global = true, value_name = "PATH")]
    pub contacts: Option<String>,

    /// Folder receiving person notes
    #[arg(long, global = true, value_name = "FOLDER")]
    pub people_folder: Option<String>,

    /// Front matter layout for rewritten notes
    #[arg(long, global = true, value_enum)]
    pub style: Option<StyleArg>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a person note from the template
    New(NewArgs),
    /// Create person notes for every contact in the configured VCF file
    Import,
    /// Print the contacts parsed from a VCF file
    Contacts(ContactsArgs),
    /// Add, replace or delete a property across selected notes
    Edit(EditArgs),
    /// Show the vault's folder tree with selection state
    Tree(TreeArgs),
    /// Show or change stored settings
    Config(ConfigArgs),
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the person; asked for on stdin when omitted
    pub name: Option<String>,
}

/// Arguments for the contacts command
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// VCF file to parse
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Which notes a command works on
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Select a note or every note below a folder
    #[arg(long, short = 's', value_name = "PATH")]
    pub select: Vec<String>,

    /// Deselect a note or every note below a folder
    #[arg(long, short = 'd', value_name = "PATH")]
    pub deselect: Vec<String>,

    /// Select every note whose vault path matches this pattern
    #[arg(long = "match", value_name = "REGEX")]
    pub pattern: Option<String>,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Kind of edit
    #[arg(value_enum)]
    pub kind: EditKindArg,

    /// Property name
    #[arg(long, short = 'p', value_name = "NAME")]
    pub property: String,

    /// Property type
    #[arg(long = "type", short = 't', value_enum, default_value = "scalar")]
    pub type_: PropertyTypeArg,

    /// Property value; comma-separated for lists
    #[arg(long, short = 'V', value_name = "VALUE", default_value = "")]
    pub value: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the tree command
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Store the template note path
    SetTemplate {
        /// Path inside the vault; empty to use the built-in template
        path: String,
    },
    /// Store the contacts file path
    SetContacts {
        /// Path inside the vault
        path: String,
    },
}

/// Kinds of edit
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKindArg {
    /// Create the property or merge values into it
    Add,
    /// Overwrite an existing property
    Replace,
    /// Remove the property
    Delete,
}

/// Property types
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTypeArg {
    /// Single text value
    Scalar,
    /// Duplicate-free list of values
    List,
}

/// Front matter layouts
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    /// Block YAML
    Yaml,
    /// JSON object
    Json,
}

/// Output formats for parsed contacts
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_edit_command() {
        let args = vec![
            "personote",
            "edit",
            "add",
            "--property",
            "tags",
            "--type",
            "list",
            "--value",
            "friend,colleague",
            "--select",
            "People",
            "--deselect",
            "People/Bob.md",
            "--dry-run",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Edit(edit_args) = cli.command {
            assert_eq!(edit_args.kind, EditKindArg::Add);
            assert_eq!(edit_args.property, "tags");
            assert_eq!(edit_args.type_, PropertyTypeArg::List);
            assert_eq!(edit_args.value, "friend,colleague");
            assert_eq!(edit_args.selection.select, vec!["People".to_string()]);
            assert_eq!(edit_args.selection.deselect, vec!["People/Bob.md".to_string()]);
            assert!(edit_args.dry_run);
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_edit_defaults() {
        let args = vec!["personote", "edit", "delete", "-p", "status", "--match", "^People/"];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Edit(edit_args) = cli.command {
            assert_eq!(edit_args.type_, PropertyTypeArg::Scalar);
            assert_eq!(edit_args.value, "");
            assert_eq!(edit_args.selection.pattern.as_deref(), Some("^People/"));
            assert!(!edit_args.dry_run);
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_global_options() {
        let args = vec![
            "personote",
            "new",
            "Jane Doe",
            "--vault",
            "/tmp/vault",
            "--people-folder",
            "Contacts",
            "--style",
            "json",
            "-v",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.vault, PathBuf::from("/tmp/vault"));
        assert_eq!(cli.overrides.people_folder.as_deref(), Some("Contacts"));
        assert_eq!(cli.overrides.style, Some(StyleArg::Json));
        assert!(cli.verbose);
        if let Commands::New(new_args) = cli.command {
            assert_eq!(new_args.name.as_deref(), Some("Jane Doe"));
        } else {
            panic!("Expected New command");
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(vec!["personote", "import", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli =
            Cli::try_parse_from(vec!["personote", "config", "set-contacts", "contacts.vcf"]).unwrap();
        if let Commands::Config(config_args) = cli.command {
            assert!(matches!(
                config_args.action,
                ConfigAction::SetContacts { ref path } if path == "contacts.vcf"
            ));
        } else {
            panic!("Expected Config command");
        }
    }
}
