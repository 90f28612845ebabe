//! Uniform JSON response wrapper

use serde::Serialize;

/// Response envelope shared by every book endpoint
///
/// `success` is always present; the other fields are omitted when unset.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Book or list of books
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data` (list endpoint only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Confirmation of a successful mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure description, present whenever `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            message: None,
            error: None,
        }
    }

    /// Attach a confirmation message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    /// Successful list response; `total` is always the length of `data`
    pub fn list(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            total: Some(total),
            ..Self::data(items)
        }
    }
}

impl Envelope<()> {
    /// Successful response with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            total: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failed response
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_omits_unset_fields() {
        let value = serde_json::to_value(Envelope::error("Book not found")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "Book not found"}));
    }

    #[test]
    fn test_list_envelope_counts_items() {
        let value = serde_json::to_value(Envelope::list(vec!["a", "b"])).unwrap();
        assert_eq!(value, json!({"success": true, "data": ["a", "b"], "total": 2}));

        let empty = serde_json::to_value(Envelope::<Vec<u8>>::list(Vec::new())).unwrap();
        assert_eq!(empty, json!({"success": true, "data": [], "total": 0}));
    }
}
