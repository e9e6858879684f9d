//! Property-Based Test Generators
//!
//! Provides proptest strategies for form events, attachments, drafts and
//! server responses.

use proptest::prelude::*;

use domain_claims::{Attachment, ClaimDraft, FieldId};

/// Strategy for any known form field
pub fn field_strategy() -> impl Strategy<Value = FieldId> {
    proptest::sample::select(FieldId::ALL.to_vec())
}

/// Strategy for raw form input, including whitespace and non-ASCII text
pub fn form_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \\t]{1,3}",
        "[A-Za-z0-9 ,.-]{1,40}",
        "\\PC{0,40}",
    ]
}

/// Strategy for identifiers the form does not know about
pub fn unknown_field_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}(-[a-z]{1,8})?"
        .prop_filter("must not be a form field", |id| FieldId::from_ui_id(id).is_none())
}

/// Strategy for a single attachment
pub fn attachment_strategy() -> impl Strategy<Value = Attachment> {
    (
        "[a-z0-9_-]{1,12}",
        prop_oneof![Just(("png", "image/png")), Just(("jpg", "image/jpeg"))],
        proptest::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(stem, (ext, content_type), bytes)| {
            Attachment::new(format!("{stem}.{ext}"), content_type, bytes)
        })
}

/// Strategy for an attachment selection, duplicates allowed
pub fn attachments_strategy() -> impl Strategy<Value = Vec<Attachment>> {
    proptest::collection::vec(attachment_strategy(), 0..5)
}

/// Strategy for arbitrary drafts
pub fn draft_strategy() -> impl Strategy<Value = ClaimDraft> {
    (
        proptest::collection::vec(form_value_strategy(), FieldId::ALL.len()),
        any::<bool>(),
        attachments_strategy(),
    )
        .prop_map(|(values, declaration, attachments)| {
            let mut draft = ClaimDraft::new();
            for (field, value) in FieldId::ALL.into_iter().zip(values) {
                draft.set_text(field, value);
            }
            draft.declaration_accepted = declaration;
            draft.replace_attachments(attachments);
            draft
        })
}

/// Strategy for 2xx statuses
pub fn success_status_strategy() -> impl Strategy<Value = u16> {
    200u16..300u16
}

/// Strategy for non-2xx statuses a server can answer with
pub fn failure_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![100u16..200u16, 300u16..600u16]
}
