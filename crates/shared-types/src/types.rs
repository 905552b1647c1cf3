use serde::{Deserialize, Serialize};

/// Outcome of validating one document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub required_flags: Vec<bool>, // One per required group, in request order
    pub required: bool,            // Every group satisfied (true when there are none)
    pub match_scores: Vec<i32>,    // 0-100 per target, -1 when no window fits
    pub average_score: i32,        // Truncated mean of match_scores, 0 when empty
}

/// POST /validate_document payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateDocumentRequest {
    pub document: String, // Base64-encoded PDF
    pub document_id: String,
    #[serde(default)]
    pub required_strings: Vec<Vec<String>>,
    #[serde(default)]
    pub validate_strings: Vec<String>,
}

impl ValidateDocumentRequest {
    /// Names of the fields that are empty; the request is rejected if any are.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.document_id.is_empty() {
            missing.push("document_id");
        }
        if self.document.is_empty() {
            missing.push("document");
        }
        if self.required_strings.is_empty() {
            missing.push("required_strings");
        }
        if self.validate_strings.is_empty() {
            missing.push("validate_strings");
        }
        missing
    }
}

/// Per-document validation entry returned to clients.
///
/// Field names follow the wire format of the service this replaces, which
/// mixes snake_case and capitalised keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentValidation {
    pub document_id: String,
    #[serde(rename = "Required")]
    pub required: bool,
    pub required_strings: Vec<bool>,
    pub validate_strings: Vec<i32>,
    #[serde(rename = "Validated")]
    pub validated: i32,
}

impl DocumentValidation {
    pub fn from_report(document_id: impl Into<String>, report: ValidationReport) -> Self {
        Self {
            document_id: document_id.into(),
            required: report.required,
            required_strings: report.required_flags,
            validate_strings: report.match_scores,
            validated: report.average_score,
        }
    }
}

/// A validation request as persisted by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub document: String,
    pub document_id: String,
    pub required_strings: Vec<Vec<String>>,
    pub validate_strings: Vec<String>,
    pub created_at: String, // RFC 3339
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Error,
}

/// Envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Success,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            data: Vec::new(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_validation_wire_names() {
        let report = ValidationReport {
            required_flags: vec![true, false],
            required: false,
            match_scores: vec![100, 80],
            average_score: 90,
        };
        let value = serde_json::to_value(DocumentValidation::from_report("doc-1", report)).unwrap();
        assert_eq!(
            value,
            json!({
                "document_id": "doc-1",
                "Required": false,
                "required_strings": [true, false],
                "validate_strings": [100, 80],
                "Validated": 90
            })
        );
    }

    #[test]
    fn test_request_defaults_missing_lists() {
        let req: ValidateDocumentRequest =
            serde_json::from_value(json!({"document": "JVBERi0=", "document_id": "a"})).unwrap();
        assert!(req.required_strings.is_empty());
        assert_eq!(req.missing_fields(), vec!["required_strings", "validate_strings"]);
    }

    #[test]
    fn test_complete_request_has_no_missing_fields() {
        let req = ValidateDocumentRequest {
            document: "JVBERi0=".to_string(),
            document_id: "a".to_string(),
            required_strings: vec![vec!["x".to_string()]],
            validate_strings: vec!["y".to_string()],
        };
        assert!(req.missing_fields().is_empty());
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ApiResponse::<StoredDocument>::error("nope")).unwrap();
        assert_eq!(value, json!({"type": "error", "data": [], "message": "nope"}));
    }
}
