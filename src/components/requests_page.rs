use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::request_card::RequestCard;
use super::toast::Toast;
use crate::api::ApiClient;
use crate::error::ConsoleError;
use crate::models::PaymentRequest;
use crate::requests::{
    apply_confirmed, filter_requests, EmptyState, RequestQuery, RequestStats, StatusFilter,
};

#[derive(Properties, PartialEq)]
pub struct RequestsPageProps {
    pub api: Rc<ApiClient>,
    pub on_toast: Callback<Toast>,
}

pub enum Msg {
    Fetch,
    Fetched(Result<Vec<PaymentRequest>, ConsoleError>),
    UpdateSearch(String),
    SelectStatus(StatusFilter),
    RequestUpdated(PaymentRequest),
}

pub struct RequestsPage {
    requests: Vec<PaymentRequest>,
    stats: RequestStats,
    query: RequestQuery,
    loading: bool,
    error: Option<String>,
    /// Decisions confirmed while a fetch is outstanding.
    confirmed_during_fetch: Vec<PaymentRequest>,
}

impl RequestsPage {
    fn fetch(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        self.confirmed_during_fetch.clear();
        let api = ctx.props().api.clone();
        ctx.link()
            .send_future(async move { Msg::Fetched(api.list_payment_requests().await) });
    }

    fn view_stats(&self, ctx: &Context<Self>) -> Html {
        let config = ctx.props().api.config();
        let tiles = [
            ("Total Requests", self.stats.total().to_string(), "text-gray-800"),
            ("Pending", self.stats.pending.to_string(), "text-yellow-600"),
            ("Approved", self.stats.approved.to_string(), "text-green-600"),
            ("Rejected", self.stats.rejected.to_string(), "text-red-600"),
            ("Total Amount", config.format_amount(self.stats.total_amount), "text-blue-600"),
        ];
        html! {
            <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
                {for tiles.into_iter().map(|(title, value, color)| html! {
                    <div class="p-4 bg-white rounded shadow">
                        <p class="text-sm text-gray-600">{title}</p>
                        <p class={classes!("text-2xl", "font-bold", color)}>{value}</p>
                    </div>
                })}
            </div>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="flex flex-col sm:flex-row gap-2">
                <input
                    type="text"
                    value={self.query.search.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateSearch(input.value())
                    })}
                    class="flex-1 px-3 py-2 border rounded focus:outline-none focus:border-blue-500"
                    placeholder="Search by name, report or plan"
                />
                <select
                    class="px-3 py-2 border rounded focus:outline-none focus:border-blue-500"
                    onchange={ctx.link().callback(|e: Event| {
                        let select = e.target_unchecked_into::<HtmlSelectElement>();
                        Msg::SelectStatus(StatusFilter::parse(&select.value()))
                    })}
                >
                    {for StatusFilter::OPTIONS.iter().map(|option| html! {
                        <option value={option.value()} selected={*option == self.query.status}>
                            {option.label()}
                        </option>
                    })}
                </select>
                <button
                    onclick={ctx.link().callback(|_| Msg::Fetch)}
                    disabled={self.loading}
                    class="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 focus:outline-none disabled:opacity-50"
                >
                    {if self.loading { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>
        }
    }
}

impl Component for RequestsPage {
    type Message = Msg;
    type Properties = RequestsPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            requests: Vec::new(),
            stats: RequestStats::default(),
            query: RequestQuery::default(),
            loading: true,
            error: None,
            confirmed_during_fetch: Vec::new(),
        };
        page.fetch(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                self.fetch(ctx);
                true
            }
            Msg::Fetched(Ok(mut requests)) => {
                log::debug!("fetched {} payment requests", requests.len());
                apply_confirmed(&mut requests, &self.confirmed_during_fetch);
                self.confirmed_during_fetch.clear();
                self.stats = RequestStats::from_requests(&requests);
                self.requests = requests;
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Fetched(Err(e)) => {
                log::error!("failed to load payment requests: {}", e);
                ctx.props().on_toast.emit(Toast::from(&e));
                self.loading = false;
                self.error = Some(e.user_message());
                true
            }
            Msg::UpdateSearch(search) => {
                self.query.search = search;
                true
            }
            Msg::SelectStatus(status) => {
                self.query.status = status;
                true
            }
            Msg::RequestUpdated(updated) => {
                if self.loading {
                    self.confirmed_during_fetch.push(updated.clone());
                }
                if let Some(slot) = self.requests.iter_mut().find(|r| r.id == updated.id) {
                    *slot = updated;
                    self.stats = RequestStats::from_requests(&self.requests);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let visible = filter_requests(&self.requests, &self.query);
        let empty = match self.error {
            Some(_) => None,
            None => EmptyState::detect(self.requests.len(), visible.len(), &self.query),
        };
        let on_updated = ctx.link().callback(Msg::RequestUpdated);

        html! {
            <div class="space-y-6">
                {self.view_stats(ctx)}
                {self.view_controls(ctx)}

                if let Some(error) = &self.error {
                    <div class="p-4 bg-red-50 text-red-700 rounded">{error}</div>
                }

                if self.loading && self.requests.is_empty() {
                    <p class="text-center text-gray-500">{"Loading requests..."}</p>
                } else if let Some(empty) = empty {
                    <p class="text-center text-gray-500 py-8">{empty.message()}</p>
                } else {
                    <div class="space-y-4">
                        {for visible.into_iter().map(|request| html! {
                            <RequestCard
                                key={request.id.clone()}
                                api={ctx.props().api.clone()}
                                request={request.clone()}
                                on_toast={ctx.props().on_toast.clone()}
                                on_updated={on_updated.clone()}
                            />
                        })}
                    </div>
                }
            </div>
        }
    }
}
