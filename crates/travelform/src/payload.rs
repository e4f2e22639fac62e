//! Request payload sent to the spreadsheet endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::photo::PhotoAttachment;
use crate::record::Draft;

/// Default routing tag naming the target sheet.
pub const DEFAULT_SHEET: &str = "FormCostumer";

/// The JSON body of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// The draft fields, flattened.
    #[serde(flatten)]
    pub draft: Draft,
    /// Derived identifier.
    pub id: String,
    /// Raw base64 photo, or `null`.
    pub foto_passport: Option<String>,
    /// Target sheet.
    pub sheet: String,
}

/// Build the payload for a draft and optional photo.
#[must_use]
pub fn build_payload(draft: &Draft, photo: Option<&PhotoAttachment>, sheet: &str) -> Payload {
    Payload {
        draft: draft.clone(),
        id: draft.identifier(),
        foto_passport: photo
            .and_then(PhotoAttachment::raw_base64)
            .map(str::to_string),
        sheet: sheet.to_string(),
    }
}

/// The parts of the endpoint's JSON answer that the client reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EndpointResponse {
    /// Stored photo reference, usually a link to the uploaded file.
    /// Non-string values are treated as no photo.
    #[serde(default, deserialize_with = "string_or_none")]
    pub foto_passport: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(other) => {
            warn!("Ignoring non-string foto_passport in response: {other}");
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ali() -> Draft {
        Draft {
            nama: "Ali".to_string(),
            tanggal_lahir: "1990-01-01".to_string(),
            jenis_kelamin: "Laki-laki".to_string(),
            nomor_passport: "X1".to_string(),
        }
    }

    #[test]
    fn test_payload_without_photo() {
        let payload = build_payload(&ali(), None, DEFAULT_SHEET);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "nama": "Ali",
                "tanggal_lahir": "1990-01-01",
                "jenis_kelamin": "Laki-laki",
                "nomor_passport": "X1",
                "id": "Ali_1990-01-01",
                "foto_passport": null,
                "sheet": "FormCostumer"
            })
        );
    }

    #[test]
    fn test_payload_strips_data_url_prefix() {
        let photo = PhotoAttachment::from_data_url("data:image/jpeg;base64,/9j/4AAQ");
        let payload = build_payload(&ali(), Some(&photo), DEFAULT_SHEET);
        assert_eq!(payload.foto_passport.as_deref(), Some("/9j/4AAQ"));
    }

    #[test]
    fn test_payload_custom_sheet() {
        let payload = build_payload(&ali(), None, "Testing");
        assert_eq!(payload.sheet, "Testing");
    }

    #[test]
    fn test_response_with_photo() {
        let response: EndpointResponse =
            serde_json::from_str(r#"{"status":"ok","foto_passport":"https://drive/x"}"#).unwrap();
        assert_eq!(response.foto_passport.as_deref(), Some("https://drive/x"));
    }

    #[test]
    fn test_response_without_photo() {
        let response: EndpointResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(response.foto_passport.is_none());

        let response: EndpointResponse =
            serde_json::from_str(r#"{"foto_passport":null}"#).unwrap();
        assert!(response.foto_passport.is_none());
    }

    #[test]
    fn test_response_non_string_photo_is_ignored() {
        for body in [
            r#"{"foto_passport":42}"#,
            r#"{"foto_passport":false}"#,
            r#"{"foto_passport":{"url":"x"}}"#,
        ] {
            let response: EndpointResponse = serde_json::from_str(body).unwrap();
            assert!(response.foto_passport.is_none(), "body: {body}");
        }
    }
}
