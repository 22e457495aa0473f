//! Payment/access request review: list filtering, counters and the
//! per-card approve/reject/notify workflow.

pub mod filter;
pub mod review;

pub use filter::{filter_requests, EmptyState, RequestQuery, RequestStats, StatusFilter};
pub use review::{
    apply_confirmed, ActionButton, CardAction, Decision, ReviewCard, ReviewError, ReviewSubmission,
    SubmitState,
};
