//! Core record types for travelform.
//!
//! A [`Draft`] is what the form holds while it is being filled in. Once the
//! endpoint has accepted it, it becomes a [`StoredRecord`] in the local list.
//! Field names match the keys the spreadsheet endpoint expects.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Gender choices offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "Laki-laki")]
    LakiLaki,
    /// Female.
    #[serde(rename = "Perempuan")]
    Perempuan,
}

impl Gender {
    /// All choices, in the order the form lists them.
    pub const ALL: [Gender; 2] = [Gender::LakiLaki, Gender::Perempuan];

    /// The label sent over the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LakiLaki => "Laki-laki",
            Self::Perempuan => "Perempuan",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "laki-laki" | "l" => Ok(Self::LakiLaki),
            "perempuan" | "p" => Ok(Self::Perempuan),
            other => Err(format!(
                "unknown gender '{other}', expected one of: Laki-laki, Perempuan"
            )),
        }
    }
}

/// The four required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Full name.
    Nama,
    /// Birth date, `YYYY-MM-DD`.
    TanggalLahir,
    /// Gender label.
    JenisKelamin,
    /// Passport number.
    NomorPassport,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 4] = [
        Field::Nama,
        Field::TanggalLahir,
        Field::JenisKelamin,
        Field::NomorPassport,
    ];

    /// The wire name of this field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nama => "nama",
            Self::TanggalLahir => "tanggal_lahir",
            Self::JenisKelamin => "jenis_kelamin",
            Self::NomorPassport => "nomor_passport",
        }
    }

    /// The label shown next to this field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nama => "Nama",
            Self::TanggalLahir => "Tanggal Lahir",
            Self::JenisKelamin => "Jenis Kelamin",
            Self::NomorPassport => "Nomor Passport",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The in-progress, not yet submitted form values.
///
/// Every field is plain text; an unselected gender is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Full name.
    pub nama: String,
    /// Birth date.
    pub tanggal_lahir: String,
    /// Gender label.
    pub jenis_kelamin: String,
    /// Passport number.
    pub nomor_passport: String,
}

impl Draft {
    /// Get the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nama => &self.nama,
            Field::TanggalLahir => &self.tanggal_lahir,
            Field::JenisKelamin => &self.jenis_kelamin,
            Field::NomorPassport => &self.nomor_passport,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Nama => self.nama = value,
            Field::TanggalLahir => self.tanggal_lahir = value,
            Field::JenisKelamin => self.jenis_kelamin = value,
            Field::NomorPassport => self.nomor_passport = value,
        }
    }

    /// Fields that are still empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Check that all four fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the empty fields.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                missing: missing.iter().map(Field::name).collect(),
            })
        }
    }

    /// Whether the draft can be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The derived record identifier, `nama + "_" + tanggal_lahir`.
    ///
    /// Not unique: two people sharing name and birth date collide.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.nama, self.tanggal_lahir)
    }

    /// The gender as a typed value, if it is one of the known labels.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.jenis_kelamin.parse().ok()
    }
}

/// A submitted record as kept in the local list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Derived identifier.
    pub id: String,

    /// The draft fields, flattened into the record.
    #[serde(flatten)]
    pub draft: Draft,

    /// Photo reference returned by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_passport: Option<String>,
}

impl StoredRecord {
    /// Build a stored record from the submitted draft and the endpoint's
    /// photo reference.
    #[must_use]
    pub fn from_draft(draft: Draft, foto_passport: Option<String>) -> Self {
        Self {
            id: draft.identifier(),
            draft,
            foto_passport,
        }
    }

    /// The photo link, treating an empty reference as absent.
    #[must_use]
    pub fn photo_link(&self) -> Option<&str> {
        self.foto_passport.as_deref().filter(|link| !link.is_empty())
    }
}
