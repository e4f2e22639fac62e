//! Form state holder.
//!
//! Owns the current [`Draft`] and the optional [`PhotoAttachment`]. The
//! submission pipeline reads from it and resets it once the endpoint has
//! accepted the record.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::photo::PhotoAttachment;
use crate::record::{Draft, Field, Gender};

/// The form being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    draft: Draft,
    photo: Option<PhotoAttachment>,
}

impl Form {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form pre-filled with a draft.
    #[must_use]
    pub fn with_draft(draft: Draft) -> Self {
        Self { draft, photo: None }
    }

    /// The current draft.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The selected photo, if any.
    #[must_use]
    pub fn photo(&self) -> Option<&PhotoAttachment> {
        self.photo.as_ref()
    }

    /// Replace one field of the draft.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Select a photo that is already encoded.
    pub fn set_photo(&mut self, photo: PhotoAttachment) {
        self.photo = Some(photo);
    }

    /// Read and encode a photo file, replacing any previous selection.
    ///
    /// The form is left unchanged if the file cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not an image or cannot be read.
    pub async fn attach_photo(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let photo = PhotoAttachment::read(path).await?;
        self.photo = Some(photo);
        Ok(())
    }

    /// Drop the selected photo.
    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Clear all fields and the photo.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.photo = None;
    }

    /// Validate the draft. The photo is never required.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the empty fields.
    pub fn validate(&self) -> Result<()> {
        self.draft.validate()
    }

    /// Fill the draft interactively, one line per field.
    ///
    /// Fields that already hold a value are skipped. An empty answer leaves
    /// the field empty so validation can report it. Gender answers are
    /// normalized to their full label when recognized.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn prompt<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        for field in Field::ALL {
            if !self.draft.get(field).is_empty() {
                continue;
            }

            match field {
                Field::JenisKelamin => {
                    let choices: Vec<_> = Gender::ALL.iter().map(Gender::as_str).collect();
                    write!(output, "{} ({}): ", field.label(), choices.join("/"))?;
                }
                Field::TanggalLahir => write!(output, "{} (YYYY-MM-DD): ", field.label())?,
                _ => write!(output, "{}: ", field.label())?,
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed while prompting for {}", field);
                break;
            }
            let answer = line.trim();

            let value = if field == Field::JenisKelamin {
                answer
                    .parse::<Gender>()
                    .map_or_else(|_| answer.to_string(), |g| g.as_str().to_string())
            } else {
                answer.to_string()
            };
            self.draft.set(field, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_empty() {
        let form = Form::new();
        assert_eq!(form.draft(), &Draft::default());
        assert!(form.photo().is_none());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_set_replaces_single_field() {
        let mut form = Form::new();
        form.set(Field::Nama, "Siti");
        form.set(Field::Nama, "Siti Aminah");
        assert_eq!(form.draft().nama, "Siti Aminah");
        assert_eq!(form.draft().tanggal_lahir, "");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = Form::new();
        form.set(Field::Nama, "Siti");
        form.set_photo(PhotoAttachment::from_bytes("image/png", b"x"));

        form.reset();

        assert_eq!(form, Form::new());
    }

    #[test]
    fn test_clear_photo() {
        let mut form = Form::new();
        form.set_photo(PhotoAttachment::from_bytes("image/png", b"x"));
        form.clear_photo();
        assert!(form.photo().is_none());
    }

    #[test]
    fn test_photo_not_required() {
        let mut form = Form::new();
        form.set(Field::Nama, "Ali");
        form.set(Field::TanggalLahir, "1990-01-01");
        form.set(Field::JenisKelamin, "Laki-laki");
        form.set(Field::NomorPassport, "X1");
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_attach_photo_failure_leaves_form_unchanged() {
        let mut form = Form::new();
        let previous = PhotoAttachment::from_bytes("image/png", b"old");
        form.set_photo(previous.clone());

        let result = form.attach_photo("/nonexistent/travelform/new.png").await;

        assert!(result.is_err());
        assert_eq!(form.photo(), Some(&previous));
    }

    #[test]
    fn test_prompt_fills_all_fields() {
        let mut form = Form::new();
        let mut input = "Budi\n1985-12-31\np\nC7654321\n".as_bytes();
        let mut output = Vec::new();

        form.prompt(&mut input, &mut output).unwrap();

        let draft = form.draft();
        assert_eq!(draft.nama, "Budi");
        assert_eq!(draft.tanggal_lahir, "1985-12-31");
        assert_eq!(draft.jenis_kelamin, "Perempuan");
        assert_eq!(draft.nomor_passport, "C7654321");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Nama: "));
        assert!(shown.contains("Laki-laki/Perempuan"));
    }

    #[test]
    fn test_prompt_skips_filled_fields() {
        let mut form = Form::new();
        form.set(Field::Nama, "Budi");
        form.set(Field::NomorPassport, "C1");
        let mut input = "2000-02-02\nL\n".as_bytes();
        let mut output = Vec::new();

        form.prompt(&mut input, &mut output).unwrap();

        assert_eq!(form.draft().tanggal_lahir, "2000-02-02");
        assert_eq!(form.draft().jenis_kelamin, "Laki-laki");
        assert!(!String::from_utf8(output).unwrap().contains("Nama: "));
    }

    #[test]
    fn test_prompt_stops_at_end_of_input() {
        let mut form = Form::new();
        let mut input = "Budi\n".as_bytes();
        let mut output = Vec::new();

        form.prompt(&mut input, &mut output).unwrap();

        assert_eq!(form.draft().nama, "Budi");
        assert_eq!(form.draft().missing_fields().len(), 3);
    }

    #[test]
    fn test_prompt_keeps_unknown_gender_text() {
        let mut form = Form::new();
        let mut input = "A\nB\nx\nD\n".as_bytes();
        let mut output = Vec::new();

        form.prompt(&mut input, &mut output).unwrap();

        assert_eq!(form.draft().jenis_kelamin, "x");
    }
}
