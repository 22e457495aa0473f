use thiserror::Error;

use crate::error::ConsoleError;
use crate::models::{PaymentRequest, RequestStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Path segment of the review endpoint.
    pub fn action(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
        }
    }

    pub fn pending_label(self) -> &'static str {
        match self {
            Decision::Approve => "Approving...",
            Decision::Reject => "Rejecting...",
        }
    }
}

/// Progress of an approve/reject call.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting(Decision),
    /// Server answered: the confirmed status, or the message to show.
    Settled(Result<RequestStatus, String>),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error("Please add a comment explaining the rejection")]
    CommentRequired,

    #[error("This request has already been reviewed")]
    AlreadyReviewed,

    #[error("A decision for this request is already being submitted")]
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    Approve,
    Reject,
    Notify,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionButton {
    pub action: CardAction,
    pub enabled: bool,
}

/// What gets sent when an administrator decides on a request.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewSubmission {
    pub request_id: String,
    pub decision: Decision,
    pub comment: String,
}

/// Local state of one request card.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewCard {
    request: PaymentRequest,
    expanded: bool,
    comment: String,
    submit: SubmitState,
    notifying: bool,
}

impl ReviewCard {
    pub fn new(request: PaymentRequest) -> Self {
        Self {
            request,
            expanded: false,
            comment: String::new(),
            submit: SubmitState::Idle,
            notifying: false,
        }
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn status(&self) -> RequestStatus {
        self.request.status
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submit, SubmitState::Submitting(_))
    }

    pub fn is_notifying(&self) -> bool {
        self.notifying
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.submit {
            SubmitState::Settled(Err(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Takes a fresh copy of the request from the list, unless a decision
    /// is in flight for it or the copy predates a decision the server has
    /// already confirmed.
    pub fn refresh(&mut self, request: PaymentRequest) {
        if self.is_submitting() {
            return;
        }
        if let SubmitState::Settled(Ok(confirmed)) = &self.submit {
            if request.is_pending() && *confirmed != RequestStatus::Pending {
                log::debug!("ignoring stale copy of request {}", request.id);
                return;
            }
        }
        self.request = request;
    }

    pub fn begin(&mut self, decision: Decision) -> Result<ReviewSubmission, ReviewError> {
        if self.is_submitting() {
            return Err(ReviewError::InFlight);
        }
        if !self.request.is_pending() {
            return Err(ReviewError::AlreadyReviewed);
        }
        let comment = self.comment.trim().to_string();
        if decision == Decision::Reject && comment.is_empty() {
            return Err(ReviewError::CommentRequired);
        }

        self.submit = SubmitState::Submitting(decision);
        Ok(ReviewSubmission {
            request_id: self.request.id.clone(),
            decision,
            comment,
        })
    }

    /// Applies the server's answer. On failure the card stays pending and
    /// keeps the typed comment so the admin can retry.
    pub fn settle(&mut self, outcome: Result<PaymentRequest, ConsoleError>) {
        match outcome {
            Ok(updated) => {
                self.submit = SubmitState::Settled(Ok(updated.status));
                self.request = updated;
                self.comment.clear();
            }
            Err(e) => {
                self.submit = SubmitState::Settled(Err(e.user_message()));
            }
        }
    }

    /// Returns the request id to notify, or `None` if notify is unavailable.
    pub fn begin_notify(&mut self) -> Option<String> {
        if self.request.is_pending() || self.notifying {
            return None;
        }
        self.notifying = true;
        Some(self.request.id.clone())
    }

    pub fn finish_notify(&mut self) {
        self.notifying = false;
    }

    pub fn actions(&self) -> Vec<ActionButton> {
        match self.request.status {
            RequestStatus::Pending => {
                let enabled = !self.is_submitting();
                vec![
                    ActionButton {
                        action: CardAction::Approve,
                        enabled,
                    },
                    ActionButton {
                        action: CardAction::Reject,
                        enabled,
                    },
                ]
            }
            RequestStatus::Approved | RequestStatus::Rejected => vec![ActionButton {
                action: CardAction::Notify,
                enabled: !self.notifying,
            }],
        }
    }
}

/// Overlays decisions confirmed while a refetch was in flight onto the
/// refetched list. A fetched copy that is still pending lost the race and is
/// replaced; a reviewed copy is newer and kept.
pub fn apply_confirmed(fetched: &mut [PaymentRequest], confirmed: &[PaymentRequest]) {
    for update in confirmed {
        if let Some(slot) = fetched.iter_mut().find(|r| r.id == update.id) {
            if slot.is_pending() && !update.is_pending() {
                *slot = update.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentType;

    fn pending() -> PaymentRequest {
        PaymentRequest {
            id: "req-1".into(),
            user: None,
            status: RequestStatus::Pending,
            payment_type: PaymentType::Subscription,
            amount: 100.0,
            screenshot_data: None,
            subscription_plan: None,
            report: None,
            is_admin_grant: false,
            admin_comment: None,
            created_at: None,
            reviewed_at: None,
        }
    }

    fn reviewed(status: RequestStatus, comment: &str) -> PaymentRequest {
        PaymentRequest {
            status,
            admin_comment: Some(comment.into()),
            ..pending()
        }
    }

    #[test]
    fn test_toggle_expands_and_collapses() {
        let mut card = ReviewCard::new(pending());
        assert!(!card.is_expanded());
        card.toggle();
        assert!(card.is_expanded());
        card.toggle();
        assert!(!card.is_expanded());
        assert_eq!(card.submit_state(), &SubmitState::Idle);
    }

    #[test]
    fn test_reject_requires_comment() {
        let mut card = ReviewCard::new(pending());
        card.set_comment("   ".into());
        assert_eq!(card.begin(Decision::Reject), Err(ReviewError::CommentRequired));
        assert_eq!(card.submit_state(), &SubmitState::Idle);
    }

    #[test]
    fn test_approve_without_comment() {
        let mut card = ReviewCard::new(pending());
        let submission = card.begin(Decision::Approve).unwrap();
        assert_eq!(submission.request_id, "req-1");
        assert_eq!(submission.comment, "");
        assert_eq!(card.submit_state(), &SubmitState::Submitting(Decision::Approve));
    }

    #[test]
    fn test_buttons_disabled_while_submitting() {
        let mut card = ReviewCard::new(pending());
        card.set_comment("Proof is blurry".into());
        card.begin(Decision::Reject).unwrap();

        assert!(card.actions().iter().all(|b| !b.enabled));
        assert_eq!(card.begin(Decision::Approve), Err(ReviewError::InFlight));
    }

    #[test]
    fn test_successful_decision_reflects_server_status() {
        let mut card = ReviewCard::new(pending());
        card.set_comment("Proof is blurry".into());
        card.begin(Decision::Reject).unwrap();
        card.settle(Ok(reviewed(RequestStatus::Rejected, "Proof is blurry")));

        assert_eq!(card.status(), RequestStatus::Rejected);
        assert_eq!(
            card.submit_state(),
            &SubmitState::Settled(Ok(RequestStatus::Rejected))
        );
        assert_eq!(card.comment(), "");
        assert_eq!(
            card.request().admin_comment.as_deref(),
            Some("Proof is blurry")
        );
    }

    #[test]
    fn test_failed_decision_stays_pending_with_server_message() {
        let mut card = ReviewCard::new(pending());
        card.set_comment("ok".into());
        card.begin(Decision::Approve).unwrap();
        card.settle(Err(ConsoleError::Server {
            status: 409,
            message: Some("Request already processed".into()),
        }));

        assert_eq!(card.status(), RequestStatus::Pending);
        assert_eq!(card.error_message(), Some("Request already processed"));
        assert_eq!(card.comment(), "ok");
        assert!(card.actions().iter().all(|b| b.enabled));
        assert!(card.begin(Decision::Approve).is_ok());
    }

    #[test]
    fn test_failed_decision_without_message_uses_fallback() {
        let mut card = ReviewCard::new(pending());
        card.begin(Decision::Approve).unwrap();
        card.settle(Err(ConsoleError::Network("offline".into())));
        assert!(card.error_message().is_some_and(|m| !m.contains("offline")));
    }

    #[test]
    fn test_reviewed_card_cannot_be_decided_again() {
        let mut card = ReviewCard::new(reviewed(RequestStatus::Approved, ""));
        assert_eq!(card.begin(Decision::Approve), Err(ReviewError::AlreadyReviewed));
    }

    #[test]
    fn test_notify_only_disables_itself() {
        let mut card = ReviewCard::new(reviewed(RequestStatus::Approved, "Welcome"));
        assert_eq!(card.begin_notify(), Some("req-1".to_string()));
        assert_eq!(card.begin_notify(), None);
        assert_eq!(
            card.actions(),
            vec![ActionButton {
                action: CardAction::Notify,
                enabled: false
            }]
        );

        card.toggle();
        assert!(card.is_expanded());

        card.finish_notify();
        assert_eq!(card.begin_notify(), Some("req-1".to_string()));
    }

    #[test]
    fn test_pending_card_cannot_notify() {
        let mut card = ReviewCard::new(pending());
        assert_eq!(card.begin_notify(), None);
    }

    #[test]
    fn test_refresh_is_ignored_while_submitting() {
        let mut card = ReviewCard::new(pending());
        card.begin(Decision::Approve).unwrap();
        card.refresh(reviewed(RequestStatus::Rejected, "stale"));
        assert_eq!(card.status(), RequestStatus::Pending);
    }

    #[test]
    fn test_stale_refresh_keeps_confirmed_decision() {
        let mut card = ReviewCard::new(pending());
        card.begin(Decision::Approve).unwrap();
        card.settle(Ok(reviewed(RequestStatus::Approved, "")));

        card.refresh(pending());
        assert_eq!(card.status(), RequestStatus::Approved);
        assert_eq!(
            card.actions(),
            vec![ActionButton {
                action: CardAction::Notify,
                enabled: true
            }]
        );

        card.refresh(reviewed(RequestStatus::Approved, "Checked"));
        assert_eq!(card.request().admin_comment.as_deref(), Some("Checked"));
    }

    #[test]
    fn test_apply_confirmed_replaces_stale_pending_copies() {
        let other = PaymentRequest {
            id: "req-2".into(),
            ..pending()
        };
        let mut fetched = vec![pending(), other.clone()];
        let confirmed = vec![
            reviewed(RequestStatus::Rejected, "Blurry"),
            PaymentRequest {
                id: "missing".into(),
                ..reviewed(RequestStatus::Approved, "")
            },
        ];

        apply_confirmed(&mut fetched, &confirmed);
        assert_eq!(fetched[0].status, RequestStatus::Rejected);
        assert_eq!(fetched[1], other);
        assert_eq!(fetched.len(), 2);
    }

    #[test]
    fn test_apply_confirmed_keeps_newer_fetched_copy() {
        let mut fetched = vec![reviewed(RequestStatus::Approved, "Server copy")];
        apply_confirmed(&mut fetched, &[reviewed(RequestStatus::Rejected, "Local")]);
        assert_eq!(fetched[0].admin_comment.as_deref(), Some("Server copy"));
    }
}
