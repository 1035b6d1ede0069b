use super::*;

#[test]
fn invalid_input_maps_to_bad_request() {
    let err = ExtractError::InvalidInput("channel_url is required".into());
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.error_code(), "E_INVALID_INPUT");
    assert_eq!(err.to_string(), "channel_url is required");
}

#[test]
fn csv_not_found_maps_to_not_found() {
    let err = ExtractError::CsvNotFound;
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "CSV file not found");
}

#[test]
fn tool_errors_are_retryable_and_internal() {
    let err = ExtractError::Tool { stderr: "HTTP Error 429".into() };
    assert!(err.retryable());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(ExtractError::Timeout { secs: 5 }.retryable());
}

#[test]
fn io_errors_are_not_retryable() {
    let err = ExtractError::from(std::io::Error::other("disk full"));
    assert!(!err.retryable());
    assert_eq!(err.error_code(), "E_IO");
}

#[test]
fn into_response_uses_mapped_status() {
    let response = ExtractError::NoVideos.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = ExtractError::CsvNotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
