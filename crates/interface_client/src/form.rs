//! Feeding a saved form into the controller
//!
//! A form file is a JSON object keyed by UI identifiers, e.g.
//! `{"name": "Ravi Kumar", "farm-size": 2.5, "declaration": true}`.
//! Every entry becomes the edit event the form view would have produced.

use serde_json::{Map, Value};

use domain_claims::{ClaimError, ClaimFormController};

/// Key that carries the declaration checkbox
pub const DECLARATION_INPUT: &str = "declaration";

/// Applies each entry of a form file as an edit event
///
/// Strings are taken verbatim, numbers and booleans as their JSON text, and
/// `null` as an empty field. The declaration is toggled only when the file
/// asks for a state different from the current one.
pub fn apply_form_values(
    controller: &mut ClaimFormController,
    values: &Map<String, Value>,
) -> Result<(), ClaimError> {
    for (key, value) in values {
        if key == DECLARATION_INPUT {
            let wanted = value.as_bool().unwrap_or(false);
            if wanted != controller.draft().declaration_accepted {
                controller.apply_declaration_toggle()?;
            }
            continue;
        }

        let text = match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        controller.apply_text_edit(key, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ports::mock::{MockClaimTransport, ScriptedConfirmation};
    use domain_claims::{FieldId, SubmissionPolicy};
    use serde_json::json;
    use std::sync::Arc;

    fn controller(policy: SubmissionPolicy) -> ClaimFormController {
        ClaimFormController::new(
            Arc::new(MockClaimTransport::new()),
            Arc::new(ScriptedConfirmation::accepting()),
        )
        .with_policy(policy)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_values_become_edits() {
        let mut controller = controller(SubmissionPolicy::default());
        let values = object(json!({
            "name": "Ravi Kumar",
            "farm-size": 2.5,
            "rainfall-range": 7,
            "email": null,
            "declaration": true
        }));

        apply_form_values(&mut controller, &values).unwrap();

        let draft = controller.draft();
        assert_eq!(draft.text(FieldId::Name), "Ravi Kumar");
        assert_eq!(draft.text(FieldId::FarmSize), "2.5");
        assert_eq!(draft.text(FieldId::RainfallRange), "7");
        assert_eq!(draft.text(FieldId::Email), "");
        assert!(draft.declaration_accepted);
    }

    #[test]
    fn test_declaration_false_leaves_unchecked() {
        let mut controller = controller(SubmissionPolicy::default());
        apply_form_values(&mut controller, &object(json!({"declaration": false}))).unwrap();
        assert!(!controller.draft().declaration_accepted);
    }

    #[test]
    fn test_unknown_key_follows_policy() {
        let values = object(json!({"favourite-colour": "green"}));

        let mut strict = controller(SubmissionPolicy::default());
        assert!(matches!(
            apply_form_values(&mut strict, &values),
            Err(ClaimError::UnrecognizedField(id)) if id == "favourite-colour"
        ));

        let mut lenient = controller(SubmissionPolicy::permissive());
        assert!(apply_form_values(&mut lenient, &values).is_ok());
        assert!(lenient.draft().is_blank());
    }
}
