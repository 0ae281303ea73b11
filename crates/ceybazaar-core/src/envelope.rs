//! Uniform response envelope returned by every backend endpoint.

use serde::{Deserialize, Serialize};

/// Response code the backend uses for a successful call.
pub const SUCCESS_CODE: &str = "00";

/// `{ responseCode, responseDesc, responseObject }` wrapper.
///
/// A non-success code is not an error at the transport level: callers check
/// [`Envelope::is_success`] themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(deserialize_with = "code_as_string")]
    pub response_code: String,
    #[serde(default)]
    pub response_desc: Option<String>,
    #[serde(default = "Option::default")]
    pub response_object: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.response_code == SUCCESS_CODE
    }

    /// Description text, or an empty string when the backend sent none.
    pub fn description(&self) -> &str {
        self.response_desc.as_deref().unwrap_or_default()
    }

    /// Payload of a successful envelope. `None` for failures and null payloads.
    pub fn into_success(self) -> Option<T> {
        if self.is_success() {
            self.response_object
        } else {
            None
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// List payload of a successful envelope; a null list counts as empty.
    pub fn into_list(self) -> Option<Vec<T>> {
        if self.is_success() {
            Some(self.response_object.unwrap_or_default())
        } else {
            None
        }
    }
}

/// Accept both `"00"` and numeric codes such as `0` or `200`.
fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => format!("{n:02}"),
    })
}
