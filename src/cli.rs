//! CLI definition using clap

use clap::{Args, Parser, Subcommand};

use crate::api::{PrincipalType, ResourceType};

#[derive(Parser)]
#[command(name = "molcmd")]
#[command(version)]
#[command(about = "MOLGENIS data platform management CLI")]
#[command(long_about = r#"
molcmd - MOLGENIS data platform management CLI

Commands:
  give     Grant a permission on a resource to a user or role
  add      Create users and groups
  make     Make a user a member of a role
  import   Import a data file or a remote URL
  ping     Check the server and print its version
  run      Run a molcmd script

Configuration:
  Reads MOLGENIS_HOST, MOLGENIS_USERNAME and MOLGENIS_PASSWORD from the
  environment; a .env file in the working directory is picked up.
"#)]
#[command(after_help = r#"
Examples:

  Grant read permission on a package:
    molcmd give bob read my_package

  Create a user and make it a role member:
    molcmd add user bob
    molcmd make bob bio-data-editor

  Import a dataset into a package:
    molcmd import dataset.xlsx --in my_package

  Run a script, continuing past failures:
    molcmd run setup.mcmd --ignore-errors
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Machine output mode (JSON Lines, for programmatic callers)
    #[arg(long, global = true)]
    pub agent: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grant a permission on a resource to a user or role
    Give(GiveCommand),

    /// Create users and groups
    Add(AddCommand),

    /// Make a user a member of a role
    Make(MakeCommand),

    /// Import a data file or a remote URL
    Import(ImportCommand),

    /// Check the server and print its version
    Ping,

    /// Run a molcmd script
    Run(RunCommand),
}

// ============ Give ============

#[derive(Args)]
#[command(after_help = "Examples:
  molcmd give bob read my_package
  molcmd give curators write my_entity --as role --type entity-type")]
pub struct GiveCommand {
    /// User or role receiving the permission
    pub principal: String,

    /// Permission to grant (e.g. read, write, writemeta)
    pub permission: String,

    /// Identifier of the resource
    pub resource: String,

    /// Treat the principal as a user or a role (auto-detected when omitted)
    #[arg(long = "as", value_enum)]
    pub principal_type: Option<PrincipalType>,

    /// Type of the resource (auto-detected when omitted)
    #[arg(long = "type", value_enum)]
    pub resource_type: Option<ResourceType>,
}

// ============ Add ============

#[derive(Args)]
pub struct AddCommand {
    #[command(subcommand)]
    pub action: AddAction,
}

#[derive(Subcommand)]
pub enum AddAction {
    /// Create a user (password defaults to the username)
    #[command(after_help = "Examples:
  molcmd add user bob")]
    User {
        /// Username for the new account
        username: String,
    },

    /// Create a group
    #[command(after_help = "Examples:
  molcmd add group bio-data")]
    Group {
        /// Name of the new group
        name: String,
    },
}

// ============ Make ============

#[derive(Args)]
#[command(after_help = "Examples:
  molcmd make bob bio-data-editor")]
pub struct MakeCommand {
    /// User to add to the role
    pub user: String,

    /// Role name (matched to its group case-insensitively)
    pub role: String,
}

// ============ Import ============

#[derive(Args)]
#[command(after_help = "Examples:
  molcmd import dataset.xlsx
  molcmd import dataset.xlsx --in my_package
  molcmd import --url https://example.org/dataset.xlsx")]
pub struct ImportCommand {
    /// Local file to upload and import
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    pub file: Option<String>,

    /// Import from a remote URL instead of a local file
    #[arg(long)]
    pub url: Option<String>,

    /// Target package id
    #[arg(long = "in")]
    pub package: Option<String>,
}

// ============ Run ============

#[derive(Args)]
#[command(after_help = "Examples:
  molcmd run setup.mcmd
  molcmd run setup.mcmd --ignore-errors")]
pub struct RunCommand {
    /// The script to run
    pub script: String,

    /// Let the script continue when a command fails
    #[arg(short, long)]
    pub ignore_errors: bool,
}
