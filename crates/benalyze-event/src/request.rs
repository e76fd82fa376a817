//! Analysis requests
//!
//! The single POST body accepted by the streaming endpoint: signed URLs for
//! the documents the backend should analyze. URL issuance belongs to the
//! storage collaborator; this crate only carries the strings.

use serde::{Deserialize, Serialize};

/// Request body for one analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Signed URL of the uploaded paystub
    pub paystub_url: String,
    /// Signed URL of the uploaded benefits handbook
    pub handbook_url: String,
    /// Signed URL of the optional RSU statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsu_url: Option<String>,
}

impl AnalysisRequest {
    /// Create a new request
    #[inline]
    #[must_use]
    pub fn new(paystub_url: impl Into<String>, handbook_url: impl Into<String>) -> Self {
        Self {
            paystub_url: paystub_url.into(),
            handbook_url: handbook_url.into(),
            rsu_url: None,
        }
    }

    /// With RSU statement URL
    #[inline]
    #[must_use]
    pub fn with_rsu_url(mut self, rsu_url: impl Into<String>) -> Self {
        self.rsu_url = Some(rsu_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_omits_absent_rsu_url() {
        let request = AnalysisRequest::new("https://s/p", "https://s/h");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"paystub_url":"https://s/p","handbook_url":"https://s/h"}"#);
    }

    #[test]
    fn request_builder_includes_rsu_url() {
        let request =
            AnalysisRequest::new("https://s/p", "https://s/h").with_rsu_url("https://s/r");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"rsu_url\":\"https://s/r\""));
    }
}
