//! Claim form controller
//!
//! Owns the draft for one form session, applies field edits forwarded by the
//! presentation layer and drives a submission attempt through the state
//! machine.
//!
//! A submission has exactly one suspension point: the network request. It is
//! exposed as three steps so a caller can keep the form responsive while the
//! request runs:
//!
//! ```rust,ignore
//! match controller.prepare_submission().await? {
//!     Preparation::Ready(prepared) => {
//!         let dispatched = prepared.dispatch().await;   // controller not borrowed
//!         let outcome = controller.complete_submission(dispatched).await?;
//!     }
//!     Preparation::Declined | Preparation::Blocked(_) => {}
//! }
//! ```
//!
//! `submit` runs the three steps back to back.
//!
//! Dropping an attempt part way, whether the `submit` future, the
//! `PreparedSubmission` or the `Dispatched` result, returns the controller to
//! `Idle` on its next use. [`abandon_submission`](ClaimFormController::abandon_submission)
//! releases an attempt explicitly while its request is still running.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use core_kernel::{DraftId, PortError, SubmissionId};

use crate::attachment::Attachment;
use crate::draft::ClaimDraft;
use crate::error::ClaimError;
use crate::field::FieldId;
use crate::outcome::SubmissionOutcome;
use crate::payload::ClaimPayload;
use crate::policy::{SubmissionPolicy, UnknownFieldPolicy};
use crate::ports::{ClaimTransport, Confirmation, Notifier, TransportResponse, CONFIRMATION_PROMPT};
use crate::submission::SubmissionState;
use crate::validation::{DraftValidator, ValidationReport};

/// Result of the confirmation step
#[derive(Debug)]
pub enum Preparation {
    /// The user declined; nothing was sent
    Declined,
    /// Pre-submit validation failed; nothing was sent
    Blocked(ValidationReport),
    /// Payload built and ready to send
    Ready(PreparedSubmission),
}

/// A confirmed attempt whose payload is already built
///
/// Holds its own handle on the transport, so dispatching it does not borrow
/// the controller.
pub struct PreparedSubmission {
    draft_id: DraftId,
    submission_id: SubmissionId,
    payload: ClaimPayload,
    transport: Arc<dyn ClaimTransport>,
    ticket: Arc<()>,
}

impl std::fmt::Debug for PreparedSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedSubmission")
            .field("submission_id", &self.submission_id)
            .field("entries", &self.payload.len())
            .finish()
    }
}

impl PreparedSubmission {
    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    pub fn payload(&self) -> &ClaimPayload {
        &self.payload
    }

    /// Sends the payload and waits for the response or a transport error
    pub async fn dispatch(self) -> Dispatched {
        let PreparedSubmission {
            draft_id,
            submission_id,
            payload,
            transport,
            ticket,
        } = self;
        let span = info_span!("claim_dispatch", draft_id = %draft_id, submission_id = %submission_id);

        let result = async move {
            info!(
                entries = payload.len(),
                files = payload.file_entries().count(),
                "Dispatching claim"
            );
            transport.submit(payload).await
        }
        .instrument(span)
        .await;

        Dispatched {
            submission_id,
            result,
            _ticket: ticket,
        }
    }
}

/// The raw result of a dispatched attempt, before classification
#[derive(Debug)]
pub struct Dispatched {
    pub submission_id: SubmissionId,
    pub result: Result<TransportResponse, PortError>,
    _ticket: Arc<()>,
}

/// The attempt the controller is waiting on
///
/// `ticket` is shared with the `PreparedSubmission` and then the `Dispatched`
/// result. Once the controller holds the only reference, nobody can complete
/// the attempt any more.
#[derive(Debug)]
struct InFlight {
    submission_id: SubmissionId,
    ticket: Arc<()>,
}

/// Controller for one claim form session
pub struct ClaimFormController {
    draft_id: DraftId,
    draft: ClaimDraft,
    state: SubmissionState,
    policy: SubmissionPolicy,
    transport: Arc<dyn ClaimTransport>,
    confirmation: Arc<dyn Confirmation>,
    notifier: Option<Arc<dyn Notifier>>,
    in_flight: Option<InFlight>,
    last_outcome: Option<SubmissionOutcome>,
}

impl ClaimFormController {
    /// Starts a session with an empty draft and the default policy
    pub fn new(transport: Arc<dyn ClaimTransport>, confirmation: Arc<dyn Confirmation>) -> Self {
        Self {
            draft_id: DraftId::new(),
            draft: ClaimDraft::default(),
            state: SubmissionState::Idle,
            policy: SubmissionPolicy::default(),
            transport,
            confirmation,
            notifier: None,
            in_flight: None,
            last_outcome: None,
        }
    }

    pub fn with_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn draft_id(&self) -> DraftId {
        self.draft_id
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    /// Current submission state; an abandoned attempt reads as `Idle`
    pub fn state(&self) -> SubmissionState {
        if self.is_abandoned() {
            SubmissionState::Idle
        } else {
            self.state
        }
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    /// Outcome of the most recent attempt, if any
    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Applies an edit event from the form view, keyed by the UI identifier
    pub fn apply_text_edit(
        &mut self,
        field_id: &str,
        raw_value: impl Into<String>,
    ) -> Result<(), ClaimError> {
        self.ensure_editable()?;

        match FieldId::from_ui_id(field_id) {
            Some(field) => {
                self.draft.set_text(field, raw_value);
                debug!(draft_id = %self.draft_id, field = %field, "Field edited");
                Ok(())
            }
            None => match self.policy.unknown_fields {
                UnknownFieldPolicy::Ignore => {
                    warn!(draft_id = %self.draft_id, field_id, "Ignoring edit for unrecognized field");
                    Ok(())
                }
                UnknownFieldPolicy::Reject => Err(ClaimError::UnrecognizedField(field_id.to_string())),
            },
        }
    }

    /// Applies an edit to a known field
    pub fn apply_field_edit(
        &mut self,
        field: FieldId,
        value: impl Into<String>,
    ) -> Result<(), ClaimError> {
        self.ensure_editable()?;
        self.draft.set_text(field, value);
        debug!(draft_id = %self.draft_id, field = %field, "Field edited");
        Ok(())
    }

    /// Replaces the whole attachment set with the newly picked files
    pub fn apply_attachment_replace(&mut self, files: Vec<Attachment>) -> Result<(), ClaimError> {
        self.ensure_editable()?;
        debug!(draft_id = %self.draft_id, count = files.len(), "Attachments replaced");
        self.draft.replace_attachments(files);
        Ok(())
    }

    /// Flips the declaration switch
    pub fn apply_declaration_toggle(&mut self) -> Result<(), ClaimError> {
        self.ensure_editable()?;
        let accepted = self.draft.toggle_declaration();
        debug!(draft_id = %self.draft_id, accepted, "Declaration toggled");
        Ok(())
    }

    /// Discards everything entered so far
    pub fn reset_draft(&mut self) -> Result<(), ClaimError> {
        self.ensure_editable()?;
        self.draft.reset();
        debug!(draft_id = %self.draft_id, "Draft reset");
        Ok(())
    }

    /// Runs a complete attempt: confirm, serialize, send, classify, notify
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, ClaimError> {
        match self.prepare_submission().await? {
            Preparation::Declined => Ok(SubmissionOutcome::Cancelled),
            Preparation::Blocked(report) => Ok(SubmissionOutcome::Blocked(report)),
            Preparation::Ready(prepared) => {
                let dispatched = prepared.dispatch().await;
                self.complete_submission(dispatched).await
            }
        }
    }

    /// Asks for confirmation and, if given, snapshots the draft into a payload
    ///
    /// On `Ready` the controller is in `Submitting` until
    /// [`complete_submission`](Self::complete_submission) is called with the
    /// dispatched result.
    pub async fn prepare_submission(&mut self) -> Result<Preparation, ClaimError> {
        self.recover_abandoned();
        if self.state != SubmissionState::Idle {
            return Err(ClaimError::SubmissionInProgress);
        }

        self.transition(SubmissionState::Confirming)?;

        if !self.confirmation.confirm(CONFIRMATION_PROMPT).await {
            self.transition(SubmissionState::Idle)?;
            info!(draft_id = %self.draft_id, "Submission declined by user");
            self.record(SubmissionOutcome::Cancelled).await;
            return Ok(Preparation::Declined);
        }

        if self.policy.validate_before_submit {
            let report = DraftValidator::validate(&self.draft);
            if !report.is_valid {
                self.transition(SubmissionState::Idle)?;
                warn!(
                    draft_id = %self.draft_id,
                    errors = report.errors.len(),
                    "Submission blocked by validation"
                );
                self.record(SubmissionOutcome::Blocked(report.clone())).await;
                return Ok(Preparation::Blocked(report));
            }
        }

        let payload = ClaimPayload::from_draft(&self.draft);
        let submission_id = SubmissionId::new_v7();

        let ticket = Arc::new(());

        self.transition(SubmissionState::Submitting)?;
        self.in_flight = Some(InFlight {
            submission_id,
            ticket: Arc::clone(&ticket),
        });

        Ok(Preparation::Ready(PreparedSubmission {
            draft_id: self.draft_id,
            submission_id,
            payload,
            transport: Arc::clone(&self.transport),
            ticket,
        }))
    }

    /// Gives up on the attempt in flight without waiting for its result
    ///
    /// The request may still reach the server. Completing the attempt
    /// afterwards fails with `UnknownSubmission`.
    pub fn abandon_submission(&mut self, submission_id: SubmissionId) -> Result<(), ClaimError> {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.submission_id == submission_id);
        if !is_current {
            return Err(ClaimError::UnknownSubmission(submission_id.to_string()));
        }

        warn!(draft_id = %self.draft_id, %submission_id, "Submission abandoned");
        self.in_flight = None;
        self.state = SubmissionState::Idle;
        Ok(())
    }

    /// Classifies a dispatched attempt, notifies the user and returns to `Idle`
    pub async fn complete_submission(
        &mut self,
        dispatched: Dispatched,
    ) -> Result<SubmissionOutcome, ClaimError> {
        let expected = self.in_flight.as_ref().map(|in_flight| in_flight.submission_id);
        if expected != Some(dispatched.submission_id) {
            return Err(ClaimError::UnknownSubmission(dispatched.submission_id.to_string()));
        }

        let outcome = SubmissionOutcome::classify(dispatched.result);
        self.transition(outcome.terminal_state())?;
        self.in_flight = None;

        match &outcome {
            SubmissionOutcome::Succeeded(receipt) => {
                info!(
                    draft_id = %self.draft_id,
                    submission_id = %dispatched.submission_id,
                    claim_id = %receipt.claim_id,
                    "Claim accepted"
                );
                if self.policy.reset_after_success {
                    self.draft.reset();
                }
            }
            SubmissionOutcome::RejectedByServer { status } => warn!(
                draft_id = %self.draft_id,
                submission_id = %dispatched.submission_id,
                status,
                "Claim rejected by server"
            ),
            SubmissionOutcome::TransportFailed { reason } => warn!(
                draft_id = %self.draft_id,
                submission_id = %dispatched.submission_id,
                %reason,
                "Claim submission failed in transport"
            ),
            SubmissionOutcome::Cancelled | SubmissionOutcome::Blocked(_) => {}
        }

        self.transition(SubmissionState::Idle)?;
        self.record(outcome.clone()).await;
        Ok(outcome)
    }

    async fn record(&mut self, outcome: SubmissionOutcome) {
        if let (Some(notifier), Some(notification)) = (&self.notifier, outcome.notification()) {
            notifier.notify(&notification).await;
        }
        self.last_outcome = Some(outcome);
    }

    /// True when the attempt in progress can no longer be finished
    ///
    /// `Confirming` is only observable from outside `prepare_submission` after
    /// its future was dropped mid-prompt.
    fn is_abandoned(&self) -> bool {
        match self.state {
            SubmissionState::Confirming => true,
            SubmissionState::Submitting => self
                .in_flight
                .as_ref()
                .map_or(true, |in_flight| Arc::strong_count(&in_flight.ticket) == 1),
            _ => false,
        }
    }

    fn recover_abandoned(&mut self) {
        if !self.is_abandoned() {
            return;
        }
        warn!(
            draft_id = %self.draft_id,
            state = %self.state,
            submission_id = ?self.in_flight.as_ref().map(|in_flight| in_flight.submission_id),
            "Recovering from a dropped submission attempt"
        );
        self.in_flight = None;
        self.state = SubmissionState::Idle;
    }

    fn ensure_editable(&mut self) -> Result<(), ClaimError> {
        self.recover_abandoned();
        if self.state == SubmissionState::Submitting && self.policy.lock_edits_while_submitting {
            return Err(ClaimError::EditWhileSubmitting);
        }
        Ok(())
    }

    fn transition(&mut self, target: SubmissionState) -> Result<(), ClaimError> {
        if !self.state.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        debug!(draft_id = %self.draft_id, from = %self.state, to = %target, "Submission state change");
        self.state = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{NotificationKind, NETWORK_ERROR_MESSAGE, REJECTED_MESSAGE};
    use crate::payload::FILES_KEY;
    use crate::ports::mock::{MockClaimTransport, RecordingNotifier, ScriptedConfirmation};

    struct Harness {
        controller: ClaimFormController,
        transport: Arc<MockClaimTransport>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(transport: MockClaimTransport, confirm: bool) -> Harness {
        let transport = Arc::new(transport);
        let notifier = Arc::new(RecordingNotifier::new());
        let controller = ClaimFormController::new(
            transport.clone(),
            Arc::new(ScriptedConfirmation::answering(confirm)),
        )
        .with_notifier(notifier.clone());
        Harness {
            controller,
            transport,
            notifier,
        }
    }

    /// Transport whose request never completes
    struct HangingTransport;

    impl core_kernel::DomainPort for HangingTransport {}

    #[async_trait::async_trait]
    impl ClaimTransport for HangingTransport {
        async fn submit(&self, _payload: ClaimPayload) -> Result<TransportResponse, PortError> {
            std::future::pending().await
        }
    }

    /// Confirmation prompt the user never answers
    struct UnansweredConfirmation;

    #[async_trait::async_trait]
    impl Confirmation for UnansweredConfirmation {
        async fn confirm(&self, _prompt: &str) -> bool {
            std::future::pending().await
        }
    }

    const SHORT_WAIT: std::time::Duration = std::time::Duration::from_millis(20);

    fn ravi(controller: &mut ClaimFormController) {
        controller.apply_text_edit("name", "Ravi Kumar").unwrap();
        controller.apply_text_edit("aadhaar", "1234-5678-9012").unwrap();
    }

    #[test]
    fn test_text_edit_maps_ui_id_to_attribute() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller.apply_text_edit("farm-location", "28.6139, 77.2090").unwrap();
        h.controller.apply_text_edit("rainfall-range", "4").unwrap();

        assert_eq!(h.controller.draft().farm_location, "28.6139, 77.2090");
        assert_eq!(h.controller.draft().rainfall_range_days, "4");
    }

    #[test]
    fn test_unknown_field_rejected_by_default() {
        let mut h = harness(MockClaimTransport::new(), true);
        let err = h.controller.apply_text_edit("farm-loaction", "x").unwrap_err();
        assert!(matches!(err, ClaimError::UnrecognizedField(id) if id == "farm-loaction"));
        assert!(h.controller.draft().is_blank());
    }

    #[test]
    fn test_unknown_field_ignored_when_permissive() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller = h.controller.with_policy(SubmissionPolicy::permissive());
        assert!(h.controller.apply_text_edit("images", "x").is_ok());
        assert!(h.controller.draft().is_blank());
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_nothing() {
        let mut h = harness(MockClaimTransport::new(), false);
        ravi(&mut h.controller);

        let outcome = h.controller.submit().await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::Cancelled);
        assert_eq!(h.transport.calls(), 0);
        assert_eq!(h.controller.state(), SubmissionState::Idle);
        assert_eq!(h.controller.draft().name, "Ravi Kumar");
        assert!(h.notifier.notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_success_notifies_with_claim_id() {
        let mut h = harness(MockClaimTransport::responding(200, r#"{"claim_id":"C-001"}"#), true);
        ravi(&mut h.controller);

        let outcome = h.controller.submit().await.unwrap();

        assert_eq!(outcome.terminal_state(), SubmissionState::Succeeded);
        assert_eq!(h.controller.state(), SubmissionState::Idle);
        assert_eq!(h.transport.calls(), 1);

        let notes = h.notifier.notifications().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Success);
        assert!(notes[0].message.contains("C-001"));

        // Draft kept by default
        assert_eq!(h.controller.draft().name, "Ravi Kumar");
        assert_eq!(h.controller.last_outcome(), Some(&outcome));
    }

    #[tokio::test]
    async fn test_server_rejection() {
        let mut h = harness(MockClaimTransport::responding(500, ""), true);
        ravi(&mut h.controller);

        let outcome = h.controller.submit().await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::RejectedByServer { status: 500 });
        let notes = h.notifier.notifications().await;
        assert_eq!(notes[0].message, REJECTED_MESSAGE);
        assert!(!notes[0].message.contains("C-"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut h = harness(
            MockClaimTransport::failing(PortError::connection("connection refused")),
            true,
        );
        ravi(&mut h.controller);

        let outcome = h.controller.submit().await.unwrap();

        assert_eq!(outcome.terminal_state(), SubmissionState::TransportFailed);
        assert_eq!(h.notifier.notifications().await[0].message, NETWORK_ERROR_MESSAGE);
        assert_eq!(h.controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_no_automatic_retry() {
        let mut h = harness(MockClaimTransport::failing(PortError::connection("down")), true);
        h.controller.submit().await.unwrap();
        assert_eq!(h.transport.calls(), 1);

        // Re-triggering re-serializes the current draft
        h.controller.apply_text_edit("crop-type", "Rice").unwrap();
        let outcome = h.controller.submit().await.unwrap();
        assert!(outcome.is_success());
        let received = h.transport.received().await;
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].text("cropType"), Some(""));
        assert_eq!(received[1].text("cropType"), Some("Rice"));
    }

    #[tokio::test]
    async fn test_edits_during_flight_do_not_reach_payload() {
        let mut h = harness(MockClaimTransport::new(), true);
        ravi(&mut h.controller);

        let Preparation::Ready(prepared) = h.controller.prepare_submission().await.unwrap() else {
            panic!("expected a prepared submission");
        };
        assert_eq!(h.controller.state(), SubmissionState::Submitting);

        h.controller.apply_text_edit("name", "Someone Else").unwrap();
        let dispatched = prepared.dispatch().await;
        h.controller.complete_submission(dispatched).await.unwrap();

        let received = h.transport.received().await;
        assert_eq!(received[0].text("name"), Some("Ravi Kumar"));
        assert_eq!(h.controller.draft().name, "Someone Else");
    }

    #[tokio::test]
    async fn test_locked_edits_during_flight() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller = h.controller.with_policy(SubmissionPolicy {
            lock_edits_while_submitting: true,
            ..SubmissionPolicy::default()
        });

        let Preparation::Ready(prepared) = h.controller.prepare_submission().await.unwrap() else {
            panic!("expected a prepared submission");
        };
        assert!(matches!(
            h.controller.apply_declaration_toggle(),
            Err(ClaimError::EditWhileSubmitting)
        ));
        assert!(matches!(
            h.controller.prepare_submission().await,
            Err(ClaimError::SubmissionInProgress)
        ));

        let dispatched = prepared.dispatch().await;
        h.controller.complete_submission(dispatched).await.unwrap();
        assert!(h.controller.apply_declaration_toggle().is_ok());
    }

    #[tokio::test]
    async fn test_completing_a_stale_attempt_is_an_error() {
        let mut h = harness(MockClaimTransport::new(), true);
        let stale = Dispatched {
            submission_id: SubmissionId::new_v7(),
            result: Ok(TransportResponse::new(200, br#"{"claim_id":"X"}"#.to_vec())),
            _ticket: Arc::new(()),
        };
        assert!(matches!(
            h.controller.complete_submission(stale).await,
            Err(ClaimError::UnknownSubmission(_))
        ));
        assert_eq!(h.controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_dropped_preparation_returns_to_idle() {
        let mut h = harness(MockClaimTransport::new(), true);
        ravi(&mut h.controller);

        let Preparation::Ready(prepared) = h.controller.prepare_submission().await.unwrap() else {
            panic!("expected a prepared submission");
        };
        assert_eq!(h.controller.state(), SubmissionState::Submitting);
        drop(prepared);

        assert_eq!(h.controller.state(), SubmissionState::Idle);
        let outcome = h.controller.submit().await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(h.transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_dropped_dispatch_returns_to_idle() {
        let mut controller = ClaimFormController::new(
            Arc::new(HangingTransport),
            Arc::new(ScriptedConfirmation::accepting()),
        )
        .with_policy(SubmissionPolicy {
            lock_edits_while_submitting: true,
            ..SubmissionPolicy::default()
        });

        let timed_out = tokio::time::timeout(SHORT_WAIT, controller.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(controller.apply_text_edit("name", "Ravi Kumar").is_ok());
        assert!(matches!(
            controller.prepare_submission().await,
            Ok(Preparation::Ready(_))
        ));
    }

    #[tokio::test]
    async fn test_dropped_confirmation_returns_to_idle() {
        let mut controller = ClaimFormController::new(
            Arc::new(MockClaimTransport::new()),
            Arc::new(UnansweredConfirmation),
        );
        ravi(&mut controller);

        let timed_out = tokio::time::timeout(SHORT_WAIT, controller.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(controller.reset_draft().is_ok());
        assert!(controller.last_outcome().is_none());

        // Asks again instead of reporting a submission in progress
        let again = tokio::time::timeout(SHORT_WAIT, controller.prepare_submission()).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn test_abandoned_attempt_cannot_be_completed() {
        let mut h = harness(MockClaimTransport::new(), true);
        ravi(&mut h.controller);

        let Preparation::Ready(prepared) = h.controller.prepare_submission().await.unwrap() else {
            panic!("expected a prepared submission");
        };
        let submission_id = prepared.submission_id();

        assert!(matches!(
            h.controller.abandon_submission(SubmissionId::new_v7()),
            Err(ClaimError::UnknownSubmission(_))
        ));
        h.controller.abandon_submission(submission_id).unwrap();
        assert_eq!(h.controller.state(), SubmissionState::Idle);

        let dispatched = prepared.dispatch().await;
        assert!(matches!(
            h.controller.complete_submission(dispatched).await,
            Err(ClaimError::UnknownSubmission(_))
        ));
        assert_eq!(h.controller.state(), SubmissionState::Idle);
        assert!(h.controller.last_outcome().is_none());
        assert!(h.notifier.notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_after_success() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller = h.controller.with_policy(SubmissionPolicy {
            reset_after_success: true,
            ..SubmissionPolicy::default()
        });
        ravi(&mut h.controller);
        h.controller
            .apply_attachment_replace(vec![Attachment::new("a.png", "image/png", vec![0u8; 4])])
            .unwrap();

        h.controller.submit().await.unwrap();
        assert!(h.controller.draft().is_blank());
    }

    #[tokio::test]
    async fn test_reset_is_skipped_on_failure() {
        let mut h = harness(MockClaimTransport::responding(503, ""), true);
        h.controller = h.controller.with_policy(SubmissionPolicy {
            validate_before_submit: false,
            ..SubmissionPolicy::strict()
        });
        ravi(&mut h.controller);

        h.controller.submit().await.unwrap();
        assert_eq!(h.controller.draft().name, "Ravi Kumar");
    }

    #[tokio::test]
    async fn test_validation_blocks_without_network() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller = h.controller.with_policy(SubmissionPolicy {
            validate_before_submit: true,
            ..SubmissionPolicy::default()
        });
        ravi(&mut h.controller);

        let outcome = h.controller.submit().await.unwrap();

        let SubmissionOutcome::Blocked(report) = &outcome else {
            panic!("expected blocked outcome, got {outcome:?}");
        };
        assert!(report.has_error_for(FieldId::FarmLocation));
        assert_eq!(h.transport.calls(), 0);
        assert_eq!(h.controller.state(), SubmissionState::Idle);
        assert_eq!(
            h.notifier.notifications().await[0].kind,
            NotificationKind::Incomplete
        );
    }

    #[tokio::test]
    async fn test_payload_carries_files_in_order() {
        let mut h = harness(MockClaimTransport::new(), true);
        h.controller
            .apply_attachment_replace(vec![
                Attachment::new("first.jpg", "image/jpeg", vec![1]),
                Attachment::new("second.jpg", "image/jpeg", vec![2]),
            ])
            .unwrap();

        h.controller.submit().await.unwrap();

        let received = h.transport.received().await;
        let names: Vec<_> = received[0].file_entries().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["first.jpg", "second.jpg"]);
        let file_keys = received[0].entries().iter().filter(|e| e.key() == FILES_KEY).count();
        assert_eq!(file_keys, 2);
    }
}
