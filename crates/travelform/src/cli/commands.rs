//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::form::Form;
use crate::record::{Draft, Field, Gender};
use crate::render::ListFormat;

/// Submit command arguments.
///
/// Every field is optional on the command line so that an incomplete form
/// reaches validation and gets the usual message.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name
    #[arg(long)]
    pub nama: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub tanggal_lahir: Option<NaiveDate>,

    /// Gender
    #[arg(long, value_enum)]
    pub jenis_kelamin: Option<GenderArg>,

    /// Passport number
    #[arg(long)]
    pub nomor_passport: Option<String>,

    /// Passport photo to upload
    #[arg(long, value_name = "FILE")]
    pub foto: Option<PathBuf>,
}

impl SubmitCommand {
    /// Build the form from the given flags. The photo is attached separately.
    #[must_use]
    pub fn to_form(&self) -> Form {
        let mut draft = Draft::default();
        if let Some(nama) = &self.nama {
            draft.set(Field::Nama, nama.as_str());
        }
        if let Some(date) = self.tanggal_lahir {
            draft.set(Field::TanggalLahir, date.format("%Y-%m-%d").to_string());
        }
        if let Some(gender) = self.jenis_kelamin {
            draft.set(Field::JenisKelamin, Gender::from(gender).as_str());
        }
        if let Some(passport) = &self.nomor_passport {
            draft.set(Field::NomorPassport, passport.as_str());
        }
        Form::with_draft(draft)
    }
}

/// Interactive entry arguments.
#[derive(Debug, Args)]
pub struct EntryCommand {
    /// Passport photo to upload
    #[arg(long, value_name = "FILE")]
    pub foto: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Gender argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    /// Laki-laki
    #[value(name = "Laki-laki", alias = "L")]
    LakiLaki,
    /// Perempuan
    #[value(name = "Perempuan", alias = "P")]
    Perempuan,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::LakiLaki => Self::LakiLaki,
            GenderArg::Perempuan => Self::Perempuan,
        }
    }
}

/// Output format for the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ListFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => Self::Plain,
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
        }
    }
}
