use std::rc::Rc;

use chrono::Utc;
use yew::prelude::*;

use super::toast::Toast;
use super::LoadState;
use crate::api::ApiClient;
use crate::config::format_money;
use crate::dashboard::{stat_cards, time_ago, StatCardData};
use crate::error::ConsoleError;
use crate::models::{DashboardAggregate, PaymentRequest};

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub data: StatCardData,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let data = &props.data;
    html! {
        <div class="p-4 bg-white rounded shadow">
            <div class="flex items-center justify-between">
                <p class="text-sm text-gray-600">{data.title}</p>
                <span class={classes!("px-2", "py-1", "rounded", data.kind.accent_class())}>{data.kind.icon()}</span>
            </div>
            <p class="text-3xl font-bold mt-2">{data.value}</p>
            if let Some((delta, percent)) = data.change {
                <p class="text-xs text-green-600 mt-1">
                    {format!("+{} in last 24h ({}%)", delta, percent)}
                </p>
            }
            if let Some(note) = &data.note {
                <p class="text-xs text-gray-500 mt-1">{note}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RecentActivityProps {
    pub requests: Vec<PaymentRequest>,
    pub currency: AttrValue,
}

#[function_component(RecentActivity)]
pub fn recent_activity(props: &RecentActivityProps) -> Html {
    let now = Utc::now();
    html! {
        <div class="p-4 bg-white rounded shadow">
            <h2 class="text-xl font-bold mb-2">{"Recent Requests"}</h2>
            if props.requests.is_empty() {
                <p class="text-sm text-gray-500">{"No recent activity"}</p>
            } else {
                <ul class="divide-y">
                    {for props.requests.iter().map(|request| {
                        let status = request.status;
                        html! {
                            <li key={request.id.clone()} class="py-2 flex items-center justify-between">
                                <div>
                                    <p class="text-sm font-medium">{request.requester_name()}</p>
                                    <p class="text-xs text-gray-500">
                                        {format!("{} · {}", request.title(), format_money(&props.currency, request.amount))}
                                    </p>
                                </div>
                                <div class="text-right">
                                    <span class={classes!("text-xs", "px-2", "py-1", "rounded", status.badge_class())}>
                                        {format!("{} {}", status.icon(), status.label())}
                                    </span>
                                    if let Some(created) = request.created_at {
                                        <p class="text-xs text-gray-400 mt-1">{time_ago(created, now)}</p>
                                    }
                                </div>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api: Rc<ApiClient>,
    pub on_toast: Callback<Toast>,
}

pub enum Msg {
    Loaded(Result<DashboardAggregate, ConsoleError>),
}

/// Fetches the aggregate once on mount. The snapshot stays until remount.
pub struct DashboardPage {
    state: LoadState<DashboardAggregate>,
}

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = DashboardPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api = ctx.props().api.clone();
        ctx.link()
            .send_future(async move { Msg::Loaded(api.dashboard_stats().await) });
        Self {
            state: LoadState::Loading,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(aggregate)) => {
                self.state = LoadState::Loaded(aggregate);
            }
            Msg::Loaded(Err(e)) => {
                log::error!("failed to load dashboard stats: {}", e);
                ctx.props().on_toast.emit(Toast::from(&e));
                self.state = LoadState::Failed(e.user_message());
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.state {
            LoadState::Loading => html! {
                <p class="text-center text-gray-500">{"Loading dashboard..."}</p>
            },
            LoadState::Failed(message) => html! {
                <div class="p-4 bg-red-50 text-red-700 rounded">{message}</div>
            },
            LoadState::Loaded(aggregate) => html! {
                <div class="space-y-6">
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-5 gap-4">
                        {for stat_cards(aggregate).into_iter().map(|data| html! {
                            <StatCard {data} />
                        })}
                    </div>
                    <RecentActivity
                        requests={aggregate.recent_requests.clone()}
                        currency={ctx.props().api.config().currency_symbol.clone()}
                    />
                </div>
            },
        }
    }
}
