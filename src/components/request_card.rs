use std::rc::Rc;

use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use super::toast::Toast;
use crate::api::ApiClient;
use crate::error::ConsoleError;
use crate::models::PaymentRequest;
use crate::requests::{ActionButton, CardAction, Decision, ReviewCard, SubmitState};

#[derive(Properties, PartialEq)]
pub struct RequestCardProps {
    pub api: Rc<ApiClient>,
    pub request: PaymentRequest,
    pub on_toast: Callback<Toast>,
    /// Receives the server's copy after a decision.
    pub on_updated: Callback<PaymentRequest>,
}

pub enum Msg {
    Toggle,
    UpdateComment(String),
    Decide(Decision),
    Decided(Decision, Result<PaymentRequest, ConsoleError>),
    Notify,
    Notified(Result<(), ConsoleError>),
}

pub struct RequestCard {
    card: ReviewCard,
}

impl RequestCard {
    fn action_button(&self, ctx: &Context<Self>, button: ActionButton) -> Html {
        let disabled = !button.enabled;
        let (label, class, msg) = match button.action {
            CardAction::Approve => (
                match self.card.submit_state() {
                    SubmitState::Submitting(Decision::Approve) => Decision::Approve.pending_label(),
                    _ => Decision::Approve.label(),
                },
                "bg-green-500 hover:bg-green-600",
                Some(Decision::Approve),
            ),
            CardAction::Reject => (
                match self.card.submit_state() {
                    SubmitState::Submitting(Decision::Reject) => Decision::Reject.pending_label(),
                    _ => Decision::Reject.label(),
                },
                "bg-red-500 hover:bg-red-600",
                Some(Decision::Reject),
            ),
            CardAction::Notify => (
                if self.card.is_notifying() { "Sending..." } else { "Notify User" },
                "bg-blue-500 hover:bg-blue-600",
                None,
            ),
        };
        let onclick = ctx.link().callback(move |_: MouseEvent| match msg {
            Some(decision) => Msg::Decide(decision),
            None => Msg::Notify,
        });

        html! {
            <button
                {onclick}
                {disabled}
                class={classes!(
                    "px-4", "py-2", "text-white", "rounded", "focus:outline-none", "disabled:opacity-50",
                    class
                )}
            >
                {label}
            </button>
        }
    }

    fn view_details(&self, ctx: &Context<Self>) -> Html {
        let request = self.card.request();
        let config = ctx.props().api.config();
        let email = request
            .user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default();
        let format_time = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
        };

        html! {
            <div class="mt-4 space-y-4">
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-2 text-sm">
                    <p><span class="text-gray-500">{"Email: "}</span>{email}</p>
                    <p><span class="text-gray-500">{"Type: "}</span>{request.payment_type.label()}</p>
                    <p><span class="text-gray-500">{"Amount: "}</span>{config.format_amount(request.amount)}</p>
                    if let Some(plan) = &request.subscription_plan {
                        <p>
                            <span class="text-gray-500">{"Plan: "}</span>
                            {&plan.name}
                            if let Some(months) = plan.duration {
                                {format!(" ({} months)", months)}
                            }
                        </p>
                    }
                    if let Some(report) = &request.report {
                        <p>
                            <span class="text-gray-500">{"Report: "}</span>
                            {format!("{} · {}", report.title, report.sector)}
                            <span class={classes!("ml-2", "text-xs", "px-2", "py-1", "rounded", report.report_type.badge_class())}>
                                {report.report_type.label()}
                            </span>
                        </p>
                    }
                    if let Some(created) = format_time(request.created_at) {
                        <p><span class="text-gray-500">{"Submitted: "}</span>{created}</p>
                    }
                    if let Some(reviewed) = format_time(request.reviewed_at) {
                        <p><span class="text-gray-500">{"Reviewed: "}</span>{reviewed}</p>
                    }
                </div>

                if let Some(screenshot) = &request.screenshot_data {
                    <a href={screenshot.clone()} target="_blank" rel="noopener noreferrer">
                        <img src={screenshot.clone()} alt="Payment proof" class="max-h-64 rounded border" />
                    </a>
                }

                if request.is_pending() {
                    <div class="space-y-2">
                        <textarea
                            value={self.card.comment().to_string()}
                            oninput={ctx.link().callback(|e: InputEvent| {
                                let input: HtmlTextAreaElement = e.target_unchecked_into();
                                Msg::UpdateComment(input.value())
                            })}
                            disabled={self.card.is_submitting()}
                            class="w-full px-3 py-2 border rounded focus:outline-none focus:border-blue-500"
                            placeholder="Comment (required when rejecting)"
                        />
                        if let Some(error) = self.card.error_message() {
                            <p class="text-sm text-red-600">{error}</p>
                        }
                    </div>
                } else if let Some(comment) = request.admin_comment.as_ref().filter(|c| !c.is_empty()) {
                    <div class="p-2 bg-gray-100 rounded text-sm">
                        <span class="text-gray-500">{"Admin comment: "}</span>{comment}
                    </div>
                }

                <div class="flex space-x-4">
                    {for self.card.actions().into_iter().map(|b| self.action_button(ctx, b))}
                </div>
            </div>
        }
    }
}

impl Component for RequestCard {
    type Message = Msg;
    type Properties = RequestCardProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            card: ReviewCard::new(ctx.props().request.clone()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.card.refresh(ctx.props().request.clone());
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Toggle => {
                self.card.toggle();
                true
            }
            Msg::UpdateComment(comment) => {
                self.card.set_comment(comment);
                true
            }
            Msg::Decide(decision) => match self.card.begin(decision) {
                Ok(submission) => {
                    let api = ctx.props().api.clone();
                    ctx.link().send_future(async move {
                        let result = api
                            .review_request(
                                &submission.request_id,
                                submission.decision,
                                &submission.comment,
                            )
                            .await;
                        Msg::Decided(submission.decision, result)
                    });
                    true
                }
                Err(e) => {
                    ctx.props().on_toast.emit(Toast::error(e.to_string()));
                    false
                }
            },
            Msg::Decided(decision, result) => {
                match &result {
                    Ok(updated) => {
                        log::info!("request {} is now {:?}", updated.id, updated.status);
                        ctx.props()
                            .on_toast
                            .emit(Toast::success(format!("Request {}", updated.status.label().to_lowercase())));
                        ctx.props().on_updated.emit(updated.clone());
                    }
                    Err(e) => {
                        log::error!("failed to {} request: {}", decision.action(), e);
                        ctx.props().on_toast.emit(Toast::from(e));
                    }
                }
                self.card.settle(result);
                true
            }
            Msg::Notify => match self.card.begin_notify() {
                Some(id) => {
                    let api = ctx.props().api.clone();
                    ctx.link()
                        .send_future(async move { Msg::Notified(api.notify_user(&id).await) });
                    true
                }
                None => false,
            },
            Msg::Notified(result) => {
                self.card.finish_notify();
                match result {
                    Ok(()) => ctx.props().on_toast.emit(Toast::success("User notified")),
                    Err(e) => {
                        log::error!("failed to notify user: {}", e);
                        ctx.props().on_toast.emit(Toast::from(&e));
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let request = self.card.request();
        let status = request.status;
        let config = ctx.props().api.config();

        html! {
            <div class="p-4 bg-white rounded shadow">
                <div
                    class="flex items-center justify-between cursor-pointer"
                    onclick={ctx.link().callback(|_| Msg::Toggle)}
                >
                    <div>
                        <p class="font-medium">
                            {request.requester_name()}
                            if request.is_admin_grant {
                                <span class="ml-2 text-xs px-2 py-1 rounded bg-gray-200 text-gray-700">{"Admin grant"}</span>
                            }
                        </p>
                        <p class="text-sm text-gray-600">{request.title()}</p>
                    </div>
                    <div class="flex items-center space-x-3">
                        <span class="font-mono">{config.format_amount(request.amount)}</span>
                        <span class={classes!("text-xs", "px-2", "py-1", "rounded", status.badge_class())}>
                            {format!("{} {}", status.icon(), status.label())}
                        </span>
                        <span class="text-gray-400">{if self.card.is_expanded() { "▲" } else { "▼" }}</span>
                    </div>
                </div>
                if self.card.is_expanded() {
                    {self.view_details(ctx)}
                }
            </div>
        }
    }
}
