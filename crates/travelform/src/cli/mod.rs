//! Command-line interface for travelform.
//!
//! This module provides the CLI structure for the `travelform` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, EntryCommand, GenderArg, ListCommand, OutputFormat, StatusCommand,
    SubmitCommand,
};

use crate::logging::Verbosity;

/// travelform - Customer travel data entry
///
/// Collects passport details for a customer, sends them to the travel
/// spreadsheet and keeps a local list of everything submitted.
#[derive(Debug, Parser)]
#[command(name = "travelform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a customer record from flags
    Submit(SubmitCommand),

    /// Fill in a customer record interactively and submit it
    Entry(EntryCommand),

    /// Show stored records
    List(ListCommand),

    /// Show storage and endpoint status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "travelform");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let args = vec![
            "travelform",
            "submit",
            "--nama",
            "Ali",
            "--tanggal-lahir",
            "1990-01-01",
            "--jenis-kelamin",
            "Laki-laki",
            "--nomor-passport",
            "X1",
            "--foto",
            "/tmp/ali.png",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.nama.as_deref(), Some("Ali"));
        assert_eq!(cmd.jenis_kelamin, Some(GenderArg::LakiLaki));
        assert_eq!(cmd.foto, Some(PathBuf::from("/tmp/ali.png")));
        assert_eq!(cmd.to_form().draft().identifier(), "Ali_1990-01-01");
    }

    #[test]
    fn test_parse_submit_gender_alias() {
        let args = vec!["travelform", "submit", "--jenis-kelamin", "P"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Submit(cmd) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(cmd.jenis_kelamin, Some(GenderArg::Perempuan));
    }

    #[test]
    fn test_parse_submit_rejects_bad_date() {
        let args = vec!["travelform", "submit", "--tanggal-lahir", "01/01/1990"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_list_format() {
        let args = vec!["travelform", "list", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_entry() {
        let args = vec!["travelform", "entry"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Entry(EntryCommand { foto: None })));
    }

    #[test]
    fn test_parse_config_show() {
        let args = vec!["travelform", "config", "show", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config_and_verbosity() {
        let args = vec!["travelform", "-c", "/custom/config.toml", "-vv", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["travelform", "-q", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
