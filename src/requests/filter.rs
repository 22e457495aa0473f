use crate::models::{PaymentRequest, RequestStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(RequestStatus::Pending),
        StatusFilter::Only(RequestStatus::Approved),
        StatusFilter::Only(RequestStatus::Rejected),
    ];

    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => StatusFilter::Only(RequestStatus::Pending),
            "approved" => StatusFilter::Only(RequestStatus::Approved),
            "rejected" => StatusFilter::Only(RequestStatus::Rejected),
            _ => StatusFilter::All,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(RequestStatus::Pending) => "pending",
            StatusFilter::Only(RequestStatus::Approved) => "approved",
            StatusFilter::Only(RequestStatus::Rejected) => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// The two user-adjustable predicates of the request list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl RequestQuery {
    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn matches(&self, request: &PaymentRequest) -> bool {
        self.status.matches(request.status) && matches_search(request, &self.search)
    }
}

fn matches_search(request: &PaymentRequest, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&term);

    let name_match = request
        .user
        .as_ref()
        .is_some_and(|u| contains(&u.first_name) || contains(&u.last_name));
    let report_match = request.report.as_ref().is_some_and(|r| contains(&r.title));
    let plan_match = request
        .subscription_plan
        .as_ref()
        .is_some_and(|p| contains(&p.name));

    name_match || report_match || plan_match
}

/// Requests satisfying both predicates, in fetch order.
pub fn filter_requests<'a>(
    requests: &'a [PaymentRequest],
    query: &RequestQuery,
) -> Vec<&'a PaymentRequest> {
    requests.iter().filter(|r| query.matches(r)).collect()
}

/// Counters shown above the list. Always computed from the full fetch,
/// never from the filtered view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestStats {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Sum over every request regardless of status.
    pub total_amount: f64,
}

impl RequestStats {
    pub fn from_requests(requests: &[PaymentRequest]) -> Self {
        requests
            .iter()
            .fold(RequestStats::default(), |mut stats, request| {
                match request.status {
                    RequestStatus::Pending => stats.pending += 1,
                    RequestStatus::Approved => stats.approved += 1,
                    RequestStatus::Rejected => stats.rejected += 1,
                }
                stats.total_amount += request.amount;
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

/// Which empty message to show when the filtered list has nothing in it.
#[derive(Clone, Debug, PartialEq)]
pub enum EmptyState {
    NoRequests,
    NoMatches { term: String },
    NoneWithStatus(RequestStatus),
}

impl EmptyState {
    pub fn detect(source_len: usize, visible_len: usize, query: &RequestQuery) -> Option<Self> {
        if visible_len > 0 {
            return None;
        }
        if source_len == 0 {
            return Some(EmptyState::NoRequests);
        }
        if query.is_searching() {
            return Some(EmptyState::NoMatches {
                term: query.search.clone(),
            });
        }
        match query.status {
            StatusFilter::Only(status) => Some(EmptyState::NoneWithStatus(status)),
            StatusFilter::All => Some(EmptyState::NoRequests),
        }
    }

    pub fn message(&self) -> String {
        match self {
            EmptyState::NoRequests => "No payment requests yet".to_string(),
            EmptyState::NoMatches { term } => format!("No requests match \"{}\"", term),
            EmptyState::NoneWithStatus(status) => {
                format!("No {} requests", status.label().to_lowercase())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentType, PlanSummary, Report, User};

    fn request(id: &str, status: RequestStatus, amount: f64, first: &str, last: &str) -> PaymentRequest {
        PaymentRequest {
            id: id.to_string(),
            user: Some(User {
                id: format!("u-{}", id),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: String::new(),
            }),
            status,
            payment_type: PaymentType::Subscription,
            amount,
            screenshot_data: None,
            subscription_plan: None,
            report: None,
            is_admin_grant: false,
            admin_comment: None,
            created_at: None,
            reviewed_at: None,
        }
    }

    fn sample() -> Vec<PaymentRequest> {
        let mut with_report = request("3", RequestStatus::Rejected, 50.0, "Cara", "Diaz");
        with_report.report = Some(Report {
            id: "rep".into(),
            title: "Pharma Deep Dive".into(),
            sector: "Healthcare".into(),
            report_type: Default::default(),
            category: String::new(),
            price: None,
        });
        let mut with_plan = request("4", RequestStatus::Pending, 25.0, "Dan", "Doe");
        with_plan.subscription_plan = Some(PlanSummary {
            name: "Enterprise".into(),
            ..PlanSummary::default()
        });
        vec![
            request("1", RequestStatus::Pending, 100.0, "Ann", "Doe"),
            request("2", RequestStatus::Approved, 200.0, "Bob", "Smith"),
            with_report,
            with_plan,
        ]
    }

    fn ids(list: &[&PaymentRequest]) -> Vec<String> {
        list.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let source = sample();
        let result = filter_requests(&source, &RequestQuery::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_names() {
        let source = sample();
        let query = RequestQuery {
            search: "DOE".into(),
            ..RequestQuery::default()
        };
        assert_eq!(ids(&filter_requests(&source, &query)), vec!["1", "4"]);
    }

    #[test]
    fn test_search_matches_report_and_plan_titles() {
        let source = sample();
        let report = RequestQuery {
            search: "pharma".into(),
            ..RequestQuery::default()
        };
        assert_eq!(ids(&filter_requests(&source, &report)), vec!["3"]);

        let plan = RequestQuery {
            search: "enterp".into(),
            ..RequestQuery::default()
        };
        assert_eq!(ids(&filter_requests(&source, &plan)), vec!["4"]);
    }

    #[test]
    fn test_search_tolerates_missing_user() {
        let mut source = sample();
        source[0].user = None;
        let query = RequestQuery {
            search: "ann".into(),
            ..RequestQuery::default()
        };
        assert!(filter_requests(&source, &query).is_empty());
    }

    #[test]
    fn test_status_filter() {
        let source = sample();
        let query = RequestQuery {
            status: StatusFilter::Only(RequestStatus::Pending),
            ..RequestQuery::default()
        };
        let result = filter_requests(&source, &query);
        assert_eq!(ids(&result), vec!["1", "4"]);
        assert!(result.iter().all(|r| r.status == RequestStatus::Pending));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let source = sample();
        let query = RequestQuery {
            search: "doe".into(),
            status: StatusFilter::Only(RequestStatus::Approved),
        };
        assert!(filter_requests(&source, &query).is_empty());
    }

    #[test]
    fn test_stats_cover_every_status() {
        let stats = RequestStats::from_requests(&sample());
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total_amount, 375.0);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_stats_of_empty_source() {
        assert_eq!(RequestStats::from_requests(&[]), RequestStats::default());
    }

    #[test]
    fn test_status_filter_parse_round_trip() {
        for option in StatusFilter::OPTIONS {
            assert_eq!(StatusFilter::parse(option.value()), option);
        }
        assert_eq!(StatusFilter::parse("bogus"), StatusFilter::All);
    }

    #[test]
    fn test_empty_state_distinguishes_search_from_no_data() {
        let query = RequestQuery {
            search: "zzz".into(),
            ..RequestQuery::default()
        };
        assert_eq!(
            EmptyState::detect(3, 0, &query),
            Some(EmptyState::NoMatches { term: "zzz".into() })
        );
        assert_eq!(EmptyState::detect(0, 0, &query), Some(EmptyState::NoRequests));
        assert_eq!(EmptyState::detect(3, 1, &query), None);
        assert_ne!(
            EmptyState::NoRequests.message(),
            EmptyState::NoMatches { term: "zzz".into() }.message()
        );
    }
}
