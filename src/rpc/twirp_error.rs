use crate::constants::{ERROR_BODY_EXCERPT_LEN, TWIRP_FALLBACK_ERROR_CODE};
use crate::rpc::TwirpErrorCode;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::collections::BTreeMap;

/// The JSON error body a Twirp server returns with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwirpErrorEnvelope {
    pub code: String,
    pub msg: String,
    #[serde(
        default,
        deserialize_with = "deserialize_meta",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub meta: BTreeMap<String, String>,
}

impl TwirpErrorEnvelope {
    /// Envelope synthesized when the peer's error body cannot be used.
    pub fn fallback(status: u16, status_text: &str) -> Self {
        Self {
            code: TWIRP_FALLBACK_ERROR_CODE.to_string(),
            msg: format!("HTTP {}: {}", status, status_text),
            meta: BTreeMap::new(),
        }
    }

    /// Translates the body of a failed response into an envelope.
    ///
    /// Any body that does not deserialize into the expected shape (empty,
    /// not JSON, an HTML error page, missing fields) yields `fallback`.
    pub fn from_response_body(status: u16, status_text: &str, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<Value>(body).and_then(|value| {
            if value.is_object() {
                serde_json::from_value::<Self>(value)
            } else {
                Err(de::Error::custom("expected a JSON object"))
            }
        });

        match parsed {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(
                    status,
                    %err,
                    body_excerpt = %body_excerpt(body),
                    "unusable Twirp error body, synthesizing fallback"
                );
                Self::fallback(status, status_text)
            }
        }
    }

    pub fn error_code(&self) -> TwirpErrorCode {
        TwirpErrorCode::from(self.code.as_str())
    }
}

// `meta` never invalidates the envelope: a non-object reads as empty, and
// non-string values are kept as their JSON text
fn deserialize_meta<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let meta = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect(),
        _ => BTreeMap::new(),
    };

    Ok(meta)
}

fn body_excerpt(body: &[u8]) -> String {
    let end = body.len().min(ERROR_BODY_EXCERPT_LEN);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
