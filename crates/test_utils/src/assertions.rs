//! Custom Test Assertions
//!
//! Assertion helpers that compare what was sent against the draft it came
//! from, with messages that name the offending field.

use domain_claims::{ClaimDraft, ClaimPayload, FieldId, SubmissionOutcome, DECLARATION_KEY, FILES_KEY};

use crate::server::RecordedRequest;

/// Asserts that a payload carries exactly the draft's values
///
/// # Panics
///
/// Panics on the first field, declaration, or file that differs
pub fn assert_payload_matches_draft(payload: &ClaimPayload, draft: &ClaimDraft) {
    for field in FieldId::ALL {
        assert_eq!(
            payload.text(field.payload_key()),
            Some(draft.text(field)),
            "payload value for '{}' differs from draft",
            field.payload_key()
        );
    }
    assert_eq!(
        payload.text(DECLARATION_KEY),
        Some(if draft.declaration_accepted { "true" } else { "false" }),
        "declaration flag differs from draft"
    );

    let sent: Vec<_> = payload.file_entries().collect();
    assert_eq!(sent.len(), draft.attachments.len(), "attachment count differs from draft");
    for (i, (sent, expected)) in sent.iter().zip(&draft.attachments).enumerate() {
        assert_eq!(*sent, expected, "attachment #{i} differs from draft");
    }
}

/// Asserts that a request recorded by the stub server carries the draft
///
/// # Panics
///
/// Panics if any scalar, the declaration, or any file part differs
pub fn assert_request_matches_draft(request: &RecordedRequest, draft: &ClaimDraft) {
    let content_type = request.content_type.as_deref().unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type '{content_type}'"
    );

    for field in FieldId::ALL {
        let key = field.payload_key();
        assert_eq!(request.count(key), 1, "expected exactly one '{key}' part");
        assert_eq!(request.text(key), Some(draft.text(field)), "value of '{key}' differs from draft");
    }
    assert_eq!(
        request.text(DECLARATION_KEY),
        Some(if draft.declaration_accepted { "true" } else { "false" }),
    );

    let files = request.files();
    assert_eq!(files.len(), draft.attachments.len(), "file part count differs from draft");
    for (part, expected) in files.iter().zip(&draft.attachments) {
        assert_eq!(part.name, FILES_KEY);
        assert_eq!(part.file_name.as_deref(), Some(expected.file_name.as_str()));
        assert_eq!(part.content_type.as_deref(), Some(expected.content_type.as_str()));
        assert_eq!(part.data, expected.bytes, "bytes of '{}' differ", expected.file_name);
    }
}

/// Asserts the outcome is a success and returns the claim id
///
/// # Panics
///
/// Panics on any other outcome
pub fn assert_succeeded(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Succeeded(receipt) => receipt.claim_id.to_string(),
        other => panic!("expected a successful submission, got {other:?}"),
    }
}
