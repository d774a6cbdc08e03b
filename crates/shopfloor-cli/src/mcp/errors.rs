//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use shopfloor_core::{ErrorKind, ShopError};

/// Maps a workshop error onto the MCP error class a client can act on.
pub fn to_mcp_error(context: &str, error: &ShopError) -> ErrorData {
    let message = format!("{context}: {error}");
    match error.kind() {
        ErrorKind::Validation => ErrorData::invalid_params(message, None),
        ErrorKind::NotFound => ErrorData::resource_not_found(message, None),
        ErrorKind::Storage | ErrorKind::Consistency => ErrorData::internal_error(message, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes_follow_kind() {
        let invalid = to_mcp_error(
            "Failed to add step",
            &ShopError::invalid_input("name").with_reason("Name is required"),
        );
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);
        assert!(invalid.message.starts_with("Failed to add step: "));

        let missing = to_mcp_error("Failed to complete step", &ShopError::StepNotFound { id: 4 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);

        let fault = to_mcp_error("Failed to complete step", &ShopError::consistency("orphan"));
        assert_eq!(fault.code, ErrorCode::INTERNAL_ERROR);
    }
}
