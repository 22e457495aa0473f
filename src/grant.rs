//! Form state for granting a user subscription or report access.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;

use crate::error::ConsoleError;
use crate::models::{find_plan, PaymentType, Report, ReportType, SubscriptionPlan, User};

/// Largest proof screenshot accepted, in bytes.
pub const MAX_PROOF_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrantError {
    #[error("Please select a user")]
    MissingUser,

    #[error("Please select a subscription plan")]
    MissingPlan,

    #[error("Please select a report")]
    MissingReport,

    #[error("Please upload the payment proof screenshot")]
    MissingProof,

    #[error("Please upload an image file (got {0})")]
    NotAnImage(String),

    #[error("Image must be 5 MB or smaller")]
    TooLarge(u64),

    #[error("Could not read the selected file")]
    Unreadable(String),
}

impl From<GrantError> for ConsoleError {
    fn from(err: GrantError) -> Self {
        ConsoleError::Validation(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProofImage {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub data_url: String,
}

impl ProofImage {
    /// Checks type and size before the file is read.
    pub fn check(mime_type: &str, size_bytes: u64) -> Result<(), GrantError> {
        if !mime_type.starts_with("image/") {
            let shown = if mime_type.is_empty() { "unknown type" } else { mime_type };
            return Err(GrantError::NotAnImage(shown.to_string()));
        }
        if size_bytes > MAX_PROOF_BYTES {
            return Err(GrantError::TooLarge(size_bytes));
        }
        Ok(())
    }

    pub fn from_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<Self, GrantError> {
        let size_bytes = bytes.len() as u64;
        Self::check(mime_type, size_bytes)?;
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
            data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        })
    }

    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.0} KB", (bytes as f64 / 1024.0).ceil())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Plan(&'static SubscriptionPlan),
    Report(Report),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantAccessPayload {
    pub user_id: String,
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<SubscriptionPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub amount: f64,
    pub screenshot_data: String,
    pub is_admin_grant: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrantForm {
    user: Option<User>,
    access_type: PaymentType,
    selection: Option<Selection>,
    proof: Option<ProofImage>,
    /// Bumped whenever a proof read starts or the proof slot is cleared, so
    /// a read that finishes late cannot land in a form that moved on.
    proof_epoch: u32,
}

impl GrantForm {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn select_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn access_type(&self) -> PaymentType {
        self.access_type
    }

    /// Switching type drops a selection made for the other type.
    pub fn set_access_type(&mut self, access_type: PaymentType) {
        if self.access_type != access_type {
            self.access_type = access_type;
            self.selection = None;
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_plan(&self) -> Option<&'static SubscriptionPlan> {
        match self.selection {
            Some(Selection::Plan(plan)) => Some(plan),
            _ => None,
        }
    }

    pub fn selected_report(&self) -> Option<&Report> {
        match &self.selection {
            Some(Selection::Report(report)) => Some(report),
            _ => None,
        }
    }

    /// Selects the plan, or clears it if it was already selected.
    pub fn toggle_plan(&mut self, plan_id: &str) {
        if self.access_type != PaymentType::Subscription {
            return;
        }
        if self.selected_plan().is_some_and(|p| p.id == plan_id) {
            self.selection = None;
        } else if let Some(plan) = find_plan(plan_id) {
            self.selection = Some(Selection::Plan(plan));
        }
    }

    /// Selects the report, or clears it if it was already selected.
    pub fn toggle_report(&mut self, report: Report) {
        if self.access_type != PaymentType::Report {
            return;
        }
        if self.selected_report().is_some_and(|r| r.id == report.id) {
            self.selection = None;
        } else {
            self.selection = Some(Selection::Report(report));
        }
    }

    pub fn proof(&self) -> Option<&ProofImage> {
        self.proof.as_ref()
    }

    pub fn set_proof(&mut self, proof: Option<ProofImage>) {
        if proof.is_none() {
            self.proof_epoch = self.proof_epoch.wrapping_add(1);
        }
        self.proof = proof;
    }

    /// Starts reading a proof file. The ticket goes back in with the result.
    pub fn begin_proof(&mut self) -> u32 {
        self.proof_epoch = self.proof_epoch.wrapping_add(1);
        self.proof_epoch
    }

    /// Stores a finished read unless the form was cleared, reset or given a
    /// newer file since `ticket` was issued.
    pub fn finish_proof(&mut self, ticket: u32, proof: ProofImage) -> bool {
        if ticket != self.proof_epoch {
            return false;
        }
        self.proof = Some(proof);
        true
    }

    pub fn amount(&self) -> Option<f64> {
        match &self.selection {
            Some(Selection::Plan(plan)) => Some(plan.price),
            Some(Selection::Report(report)) => Some(report.price.unwrap_or(0.0)),
            None => None,
        }
    }

    /// Checks user, then the type-specific selection, then the proof, and
    /// assembles the payload once all are present.
    pub fn validate(&self) -> Result<GrantAccessPayload, GrantError> {
        let user = self.user.as_ref().ok_or(GrantError::MissingUser)?;
        let (subscription_plan, report_id) = match (&self.access_type, &self.selection) {
            (PaymentType::Subscription, Some(Selection::Plan(plan))) => {
                (Some((*plan).clone()), None)
            }
            (PaymentType::Subscription, _) => return Err(GrantError::MissingPlan),
            (PaymentType::Report, Some(Selection::Report(report))) => (None, Some(report.id.clone())),
            (PaymentType::Report, _) => return Err(GrantError::MissingReport),
        };
        let proof = self.proof.as_ref().ok_or(GrantError::MissingProof)?;

        Ok(GrantAccessPayload {
            user_id: user.id.clone(),
            payment_type: self.access_type,
            subscription_plan,
            report_id,
            amount: self.amount().unwrap_or(0.0),
            screenshot_data: proof.data_url.clone(),
            is_admin_grant: true,
        })
    }

    pub fn reset(&mut self) {
        let epoch = self.proof_epoch.wrapping_add(1);
        *self = Self {
            proof_epoch: epoch,
            ..Self::default()
        };
    }
}

/// Read-only summary of the form shown beside it.
#[derive(Clone, Debug, PartialEq)]
pub struct GrantPreview {
    pub user: Option<(String, String)>,
    pub access: &'static str,
    pub item: Option<String>,
    pub detail: Option<String>,
    pub amount: Option<f64>,
    pub proof: Option<String>,
    pub ready: bool,
}

impl GrantPreview {
    pub fn compose(form: &GrantForm) -> Self {
        let (item, detail) = match form.selection() {
            Some(Selection::Plan(plan)) => (
                Some(plan.name.to_string()),
                Some(format!(
                    "{} month(s) · {} reports ({} premium, {} bluechip)",
                    plan.duration, plan.total_reports, plan.premium_reports, plan.bluechip_reports
                )),
            ),
            Some(Selection::Report(report)) => (
                Some(report.title.clone()),
                Some(format!("{} · {}", report.sector, report.report_type.label())),
            ),
            None => (None, None),
        };

        Self {
            user: form.user().map(|u| (u.full_name(), u.email.clone())),
            access: form.access_type().label(),
            item,
            detail,
            amount: form.amount(),
            proof: form
                .proof()
                .map(|p| format!("{} ({})", p.file_name, p.size_label())),
            ready: form.validate().is_ok(),
        }
    }
}

pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| {
            u.full_name().to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn filter_reports<'a>(
    reports: &'a [Report],
    term: &str,
    report_type: Option<ReportType>,
) -> Vec<&'a Report> {
    let term = term.trim().to_lowercase();
    reports
        .iter()
        .filter(|r| report_type.map_or(true, |t| r.report_type == t))
        .filter(|r| {
            term.is_empty()
                || r.title.to_lowercase().contains(&term)
                || r.sector.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
        }
    }

    fn report(id: &str, title: &str, sector: &str, report_type: ReportType) -> Report {
        Report {
            id: id.into(),
            title: title.into(),
            sector: sector.into(),
            report_type,
            category: String::new(),
            price: Some(499.0),
        }
    }

    fn proof() -> ProofImage {
        ProofImage::from_bytes("receipt.png", "image/png", &[137, 80, 78, 71]).unwrap()
    }

    #[test]
    fn test_proof_must_be_an_image() {
        assert_eq!(
            ProofImage::check("application/pdf", 10),
            Err(GrantError::NotAnImage("application/pdf".into()))
        );
        assert!(ProofImage::check("image/jpeg", 10).is_ok());
    }

    #[test]
    fn test_proof_size_ceiling() {
        assert!(ProofImage::check("image/png", MAX_PROOF_BYTES).is_ok());
        assert_eq!(
            ProofImage::check("image/png", MAX_PROOF_BYTES + 1),
            Err(GrantError::TooLarge(MAX_PROOF_BYTES + 1))
        );
    }

    #[test]
    fn test_proof_data_url() {
        let proof = proof();
        assert_eq!(proof.data_url, "data:image/png;base64,iVBORw==");
        assert_eq!(proof.size_bytes, 4);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }

    #[test]
    fn test_default_access_type_is_subscription() {
        assert_eq!(GrantForm::default().access_type(), PaymentType::Subscription);
    }

    #[test]
    fn test_plan_toggle() {
        let mut form = GrantForm::default();
        form.toggle_plan("basic");
        assert_eq!(form.selected_plan().map(|p| p.id), Some("basic"));
        form.toggle_plan("enterprise");
        assert_eq!(form.selected_plan().map(|p| p.id), Some("enterprise"));
        form.toggle_plan("enterprise");
        assert!(form.selection().is_none());
    }

    #[test]
    fn test_switching_type_clears_selection() {
        let mut form = GrantForm::default();
        form.toggle_plan("basic");
        form.set_access_type(PaymentType::Report);
        assert!(form.selection().is_none());

        form.toggle_report(report("r1", "Auto", "Autos", ReportType::Free));
        form.set_access_type(PaymentType::Report);
        assert!(form.selected_report().is_some());
    }

    #[test]
    fn test_plan_ignored_for_report_access() {
        let mut form = GrantForm::default();
        form.set_access_type(PaymentType::Report);
        form.toggle_plan("basic");
        assert!(form.selection().is_none());
    }

    #[test]
    fn test_validation_order() {
        let mut form = GrantForm::default();
        form.toggle_plan("basic");
        form.set_proof(Some(proof()));
        assert_eq!(form.validate(), Err(GrantError::MissingUser));

        let mut form = GrantForm::default();
        form.select_user(Some(user()));
        assert_eq!(form.validate(), Err(GrantError::MissingPlan));
        form.set_access_type(PaymentType::Report);
        assert_eq!(form.validate(), Err(GrantError::MissingReport));

        form.toggle_report(report("r1", "Auto", "Autos", ReportType::Premium));
        assert_eq!(form.validate(), Err(GrantError::MissingProof));
    }

    #[test]
    fn test_valid_report_payload() {
        let mut form = GrantForm::default();
        form.select_user(Some(user()));
        form.set_access_type(PaymentType::Report);
        form.toggle_report(report("r9", "Banks", "Finance", ReportType::Bluechip));
        form.set_proof(Some(proof()));

        let payload = form.validate().unwrap();
        assert_eq!(payload.user_id, "u1");
        assert_eq!(payload.report_id.as_deref(), Some("r9"));
        assert!(payload.subscription_plan.is_none());
        assert_eq!(payload.amount, 499.0);
        assert!(payload.is_admin_grant);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["paymentType"], "report");
        assert_eq!(json["reportId"], "r9");
        assert!(json.get("subscriptionPlan").is_none());
    }

    #[test]
    fn test_valid_subscription_payload_carries_plan() {
        let mut form = GrantForm::default();
        form.select_user(Some(user()));
        form.toggle_plan("standard");
        form.set_proof(Some(proof()));

        let json = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(json["subscriptionPlan"]["name"], "Standard");
        assert_eq!(json["subscriptionPlan"]["totalReports"], 35);
        assert_eq!(json["amount"], 2499.0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = GrantForm::default();
        form.select_user(Some(user()));
        form.set_access_type(PaymentType::Report);
        form.set_proof(Some(proof()));
        form.reset();
        assert!(form.user().is_none());
        assert_eq!(form.access_type(), PaymentType::Subscription);
        assert!(form.selection().is_none());
        assert!(form.proof().is_none());
    }

    #[test]
    fn test_late_proof_read_is_dropped_after_reset() {
        let mut form = GrantForm::default();
        let ticket = form.begin_proof();
        form.reset();

        assert!(!form.finish_proof(ticket, proof()));
        assert!(form.proof().is_none());
    }

    #[test]
    fn test_only_latest_proof_read_lands() {
        let mut form = GrantForm::default();
        let first = form.begin_proof();
        let second = form.begin_proof();

        assert!(form.finish_proof(second, proof()));
        assert!(!form.finish_proof(first, proof()));
        assert!(form.proof().is_some());

        let third = form.begin_proof();
        form.set_proof(None);
        assert!(!form.finish_proof(third, proof()));
        assert!(form.proof().is_none());
    }

    #[test]
    fn test_preview() {
        let mut form = GrantForm::default();
        assert!(!GrantPreview::compose(&form).ready);

        form.select_user(Some(user()));
        form.toggle_plan("basic");
        form.set_proof(Some(proof()));
        let preview = GrantPreview::compose(&form);

        assert_eq!(
            preview.user,
            Some(("Jane Doe".to_string(), "jane@example.com".to_string()))
        );
        assert_eq!(preview.access, "Subscription");
        assert_eq!(preview.item.as_deref(), Some("Basic"));
        assert_eq!(preview.amount, Some(999.0));
        assert_eq!(preview.proof.as_deref(), Some("receipt.png (1 KB)"));
        assert!(preview.ready);
    }

    #[test]
    fn test_filter_users() {
        let users = vec![
            user(),
            User {
                id: "u2".into(),
                first_name: "Raj".into(),
                last_name: "Patel".into(),
                email: "raj@corp.in".into(),
            },
        ];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "jane doe")[0].id, "u1");
        assert_eq!(filter_users(&users, "CORP")[0].id, "u2");
        assert!(filter_users(&users, "nobody").is_empty());
    }

    #[test]
    fn test_filter_reports_by_text_and_type() {
        let reports = vec![
            report("r1", "Bank Outlook", "Finance", ReportType::Premium),
            report("r2", "Steel Cycle", "Metals", ReportType::Free),
            report("r3", "Private Banks", "Finance", ReportType::Bluechip),
        ];
        let ids = |list: Vec<&Report>| list.iter().map(|r| r.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(filter_reports(&reports, "finance", None)), vec!["r1", "r3"]);
        assert_eq!(
            ids(filter_reports(&reports, "bank", Some(ReportType::Bluechip))),
            vec!["r3"]
        );
        assert_eq!(ids(filter_reports(&reports, "", Some(ReportType::Free))), vec!["r2"]);
    }
}
