mod app;
mod dashboard_page;
mod file_drop;
mod grant_page;
mod request_card;
mod requests_page;
mod selectors;
mod shell;
mod toast;

pub use app::App;
pub use dashboard_page::{DashboardPage, RecentActivity, StatCard};
pub use file_drop::{read_proof, FileDrop};
pub use grant_page::{GrantPage, PreviewPanel};
pub use request_card::RequestCard;
pub use requests_page::RequestsPage;
pub use selectors::{AccessTypeToggle, PlanSelector, ReportSelector, UserSelector};
pub use shell::{Header, Layout, MobileDrawer, NavLinks, Sidebar};
pub use toast::{Toast, ToastKind, ToastList};

/// Result of a fetch-on-mount.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}
