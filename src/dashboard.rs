use chrono::{DateTime, Utc};

use crate::models::DashboardAggregate;

/// `round(delta / total * 100)`, or 0 when there is no total yet.
pub fn change_percent(delta: u64, total: u64) -> i64 {
    if total == 0 {
        return 0;
    }
    (delta as f64 / total as f64 * 100.0).round() as i64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKind {
    Users,
    Reports,
    Requests,
    Pending,
    Contacts,
}

impl StatKind {
    pub fn icon(self) -> &'static str {
        match self {
            StatKind::Users => "👥",
            StatKind::Reports => "📄",
            StatKind::Requests => "💳",
            StatKind::Pending => "⏳",
            StatKind::Contacts => "✉",
        }
    }

    pub fn accent_class(self) -> &'static str {
        match self {
            StatKind::Users => "bg-blue-50 text-blue-600",
            StatKind::Reports => "bg-indigo-50 text-indigo-600",
            StatKind::Requests => "bg-green-50 text-green-600",
            StatKind::Pending => "bg-yellow-50 text-yellow-600",
            StatKind::Contacts => "bg-pink-50 text-pink-600",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatCardData {
    pub kind: StatKind,
    pub title: &'static str,
    pub value: u64,
    /// New items in the last 24 hours and their share of the total.
    pub change: Option<(u64, i64)>,
    pub note: Option<String>,
}

impl StatCardData {
    fn with_change(kind: StatKind, title: &'static str, value: u64, delta: u64) -> Self {
        Self {
            kind,
            title,
            value,
            change: Some((delta, change_percent(delta, value))),
            note: None,
        }
    }
}

pub fn stat_cards(aggregate: &DashboardAggregate) -> Vec<StatCardData> {
    let last = &aggregate.last_24h;
    vec![
        StatCardData::with_change(StatKind::Users, "Total Users", aggregate.total_users, last.users),
        StatCardData::with_change(
            StatKind::Reports,
            "Total Reports",
            aggregate.total_reports,
            last.reports,
        ),
        StatCardData::with_change(
            StatKind::Requests,
            "Payment Requests",
            aggregate.total_requests,
            last.requests,
        ),
        StatCardData {
            kind: StatKind::Pending,
            title: "Pending Review",
            value: aggregate.pending_requests,
            change: None,
            note: Some("Awaiting a decision".to_string()),
        },
        StatCardData {
            note: Some(format!("{} unread", aggregate.unread_contacts)),
            ..StatCardData::with_change(
                StatKind::Contacts,
                "Contact Messages",
                aggregate.total_contacts,
                last.contacts,
            )
        },
    ]
}

pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", seconds / 60),
        3600..=86_399 => format!("{}h ago", seconds / 3600),
        86_400..=2_591_999 => format!("{}d ago", seconds / 86_400),
        _ => then.format("%Y-%m-%d").to_string(),
    }
}
