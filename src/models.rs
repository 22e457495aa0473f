use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "Unnamed".to_string()
        } else {
            name.to_string()
        }
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            RequestStatus::Pending => "bg-yellow-100 text-yellow-800",
            RequestStatus::Approved => "bg-green-100 text-green-800",
            RequestStatus::Rejected => "bg-red-100 text-red-800",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RequestStatus::Pending => "⏳",
            RequestStatus::Approved => "✔",
            RequestStatus::Rejected => "✕",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Free,
    Premium,
    Bluechip,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [ReportType::Free, ReportType::Premium, ReportType::Bluechip];

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Free => "Free",
            ReportType::Premium => "Premium",
            ReportType::Bluechip => "Bluechip",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            ReportType::Free => "bg-gray-100 text-gray-700",
            ReportType::Premium => "bg-purple-100 text-purple-800",
            ReportType::Bluechip => "bg-blue-100 text-blue-800",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(ReportType::Free),
            "premium" => Some(ReportType::Premium),
            "bluechip" => Some(ReportType::Bluechip),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Subscription,
    Report,
}

impl PaymentType {
    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Subscription => "Subscription",
            PaymentType::Report => "Report",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(alias = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sector: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_type: ReportType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
    /// Length of the plan in months.
    pub duration: u32,
    pub total_reports: u32,
    pub premium_reports: u32,
    pub bluechip_reports: u32,
}

/// Plans offered in the grant-access flow. Not fetched from the API.
pub const PLAN_CATALOG: [SubscriptionPlan; 4] = [
    SubscriptionPlan {
        id: "basic",
        name: "Basic",
        price: 999.0,
        duration: 1,
        total_reports: 10,
        premium_reports: 2,
        bluechip_reports: 0,
    },
    SubscriptionPlan {
        id: "standard",
        name: "Standard",
        price: 2499.0,
        duration: 3,
        total_reports: 35,
        premium_reports: 10,
        bluechip_reports: 2,
    },
    SubscriptionPlan {
        id: "professional",
        name: "Professional",
        price: 4499.0,
        duration: 6,
        total_reports: 80,
        premium_reports: 25,
        bluechip_reports: 8,
    },
    SubscriptionPlan {
        id: "enterprise",
        name: "Enterprise",
        price: 7999.0,
        duration: 12,
        total_reports: 200,
        premium_reports: 60,
        bluechip_reports: 20,
    },
];

pub fn find_plan(id: &str) -> Option<&'static SubscriptionPlan> {
    PLAN_CATALOG.iter().find(|plan| plan.id == id)
}

/// Plan details as embedded in a payment request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<User>,
    pub status: RequestStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_type: PaymentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default)]
    pub screenshot_data: Option<String>,
    #[serde(default)]
    pub subscription_plan: Option<PlanSummary>,
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_admin_grant: bool,
    #[serde(default)]
    pub admin_comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl PaymentRequest {
    pub fn requester_name(&self) -> String {
        self.user
            .as_ref()
            .map(User::full_name)
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    /// Report title or plan name, whichever the request carries.
    pub fn title(&self) -> String {
        let report = self
            .report
            .as_ref()
            .map(|r| r.title.as_str())
            .filter(|t| !t.is_empty());
        let plan = self
            .subscription_plan
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty());

        report
            .or(plan)
            .map(str::to_string)
            .unwrap_or_else(|| "Payment Request".to_string())
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Last24h {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reports: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contacts: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAggregate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_reports: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_requests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_requests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_contacts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unread_contacts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_requests: Vec<PaymentRequest>,
    #[serde(default, rename = "last24h", deserialize_with = "null_as_default")]
    pub last_24h: Last24h,
}
