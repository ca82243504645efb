//! Unit tests for RepositoryError types and error handling

use chapterboard_repository::RepositoryError;

#[test]
fn test_error_corrupt_record_display() {
    let error = RepositoryError::CorruptRecord {
        id: "0b6f6d0e-1111-4c3a-9d55-2f6e3c1a7b42".to_string(),
        reason: "`Done` is not a valid status".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Corrupt record 0b6f6d0e-1111-4c3a-9d55-2f6e3c1a7b42: `Done` is not a valid status"
    );
}

#[test]
fn test_error_write_rejected_display() {
    let error = RepositoryError::WriteRejected("duplicate key".to_string());

    assert_eq!(error.to_string(), "Write rejected: duplicate key");
}

#[test]
fn test_error_other_display() {
    let error = RepositoryError::Other("pool closed".to_string());

    assert_eq!(error.to_string(), "Repository error: pool closed");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RepositoryError>();
}
