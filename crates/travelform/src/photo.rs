//! Passport photo attachments.
//!
//! The form keeps the selected photo as a base64 data URL, the same shape a
//! browser file reader produces. Only the payload after the first comma is
//! ever sent to the endpoint.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// A photo held by the form before submission.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    data_url: String,
}

impl PhotoAttachment {
    /// Wrap an existing data URL.
    #[must_use]
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }

    /// Encode raw image bytes with the given MIME type.
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:{mime};base64,{}", base64::encode(bytes)),
        }
    }

    /// Read an image file and encode it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhotoUnsupported`] if the extension is not a known
    /// image type, or [`Error::PhotoRead`] if the file cannot be read.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime = image_mime(path).ok_or_else(|| Error::PhotoUnsupported {
            path: path.to_path_buf(),
        })?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| Error::PhotoRead {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Encoded photo {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::from_bytes(mime, &bytes))
    }

    /// The full data URL.
    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// The raw base64 payload with the data-URI prefix stripped.
    ///
    /// A data URL without a comma has no payload and yields `None`.
    #[must_use]
    pub fn raw_base64(&self) -> Option<&str> {
        self.data_url.split_once(',').map(|(_, payload)| payload)
    }
}

impl std::fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = self
            .data_url
            .split_once(',')
            .map_or("", |(prefix, _)| prefix);
        f.debug_struct("PhotoAttachment")
            .field("prefix", &prefix)
            .field("len", &self.data_url.len())
            .finish()
    }
}

/// Guess an image MIME type from the file extension.
fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}
