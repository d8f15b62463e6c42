use serde::{de::DeserializeOwned, Serialize};

use crate::{ConnectorError, Result};

/// Wire format used for request and response bodies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Codec {
    #[default]
    Json,
    #[cfg(feature = "xml")]
    Xml,
}

impl Codec {
    /// MIME type sent as both `Content-Type` and `Accept`.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            #[cfg(feature = "xml")]
            Self::Xml => "application/xml",
        }
    }

    /// Serializes a request payload.
    ///
    /// A payload that renders as `null` (`None`, `()`) is rejected with
    /// [`ConnectorError::InvalidArgument`].
    pub fn encode<T: Serialize + ?Sized>(self, payload: &T) -> Result<Vec<u8>> {
        match self {
            Self::Json => {
                let body = serde_json::to_vec(payload)
                    .map_err(|err| ConnectorError::Encode(format!("invalid JSON payload: {err}")))?;
                if body == b"null" {
                    return Err(null_payload());
                }
                Ok(body)
            }
            #[cfg(feature = "xml")]
            Self::Xml => {
                let value = serde_json::to_value(payload)
                    .map_err(|err| ConnectorError::Encode(format!("invalid payload: {err}")))?;
                if value.is_null() {
                    return Err(null_payload());
                }
                quick_xml::se::to_string(payload)
                    .map(String::into_bytes)
                    .map_err(|err| ConnectorError::Encode(format!("invalid XML payload: {err}")))
            }
        }
    }

    /// Deserializes a response body.
    ///
    /// Returns `Ok(None)` when the body is empty or decodes to `null`.
    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<Option<T>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match self {
            Self::Json => serde_json::from_slice::<Option<T>>(body).map_err(|err| {
                ConnectorError::Decode(format!(
                    "invalid JSON response: {err}; body: {}",
                    String::from_utf8_lossy(body)
                ))
            }),
            #[cfg(feature = "xml")]
            Self::Xml => {
                let text = std::str::from_utf8(body).map_err(|err| {
                    ConnectorError::Decode(format!("XML response is not UTF-8: {err}"))
                })?;
                quick_xml::de::from_str::<T>(text)
                    .map(Some)
                    .map_err(|err| {
                        ConnectorError::Decode(format!("invalid XML response: {err}; body: {text}"))
                    })
            }
        }
    }
}

fn null_payload() -> ConnectorError {
    ConnectorError::InvalidArgument("request payload must not be null".to_owned())
}
