//! The response envelope every endpoint wraps its payload in.

use serde::Deserialize;

use crate::error::Error;

/// `{ success, errorMessage, code, data }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    pub code: i32,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap a payload-carrying envelope. A successful envelope with
    /// no `data` is a protocol violation and surfaces as
    /// [`Error::MissingData`].
    pub fn into_data(self) -> Result<T, Error> {
        match self.into_result()? {
            Some(data) => Ok(data),
            None => Err(Error::MissingData),
        }
    }

    /// Unwrap an envelope whose payload is optional or irrelevant.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::api(
                self.code,
                self.error_message
                    .unwrap_or_else(|| "Something went wrong".to_string()),
            ))
        }
    }
}

/// One page of a server-paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Total page count for the current page size.
    pub pages: usize,
    /// Total item count across all pages.
    pub count: usize,
}

/// An unpaginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let envelope: Envelope<Vec<i32>> =
            serde_json::from_str(r#"{"success":true,"code":200,"data":[1,2]}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn failure_envelope_yields_api_error() {
        let envelope: Envelope<()> = serde_json::from_str(
            r#"{"success":false,"errorMessage":"Task not found","code":404,"data":null}"#,
        )
        .unwrap();
        match envelope.into_result() {
            Err(Error::Api { code, message }) => {
                assert_eq!(code, 404);
                assert_eq!(message, "Task not found");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn failure_without_message_gets_a_generic_one() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success":false,"code":-1}"#).unwrap();
        match envelope.into_result() {
            Err(Error::Api { message, .. }) => assert_eq!(message, "Something went wrong"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn successful_empty_envelope_is_ok() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success":true,"code":200}"#).unwrap();
        assert!(envelope.into_result().unwrap().is_none());
    }

    #[test]
    fn paged_listing_decodes() {
        let paged: Paged<String> = serde_json::from_str(
            r#"{"items":["a","b"],"pages":3,"count":25}"#,
        )
        .unwrap();
        assert_eq!(paged.items.len(), 2);
        assert_eq!(paged.pages, 3);
        assert_eq!(paged.count, 25);
    }
}
