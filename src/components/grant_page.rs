use std::rc::Rc;

use futures::future::join;
use web_sys::File;
use yew::prelude::*;

use super::file_drop::{read_proof, FileDrop};
use super::selectors::{AccessTypeToggle, PlanSelector, ReportSelector, UserSelector};
use super::toast::Toast;
use super::LoadState;
use crate::api::ApiClient;
use crate::config::format_money;
use crate::error::ConsoleError;
use crate::grant::{GrantError, GrantForm, GrantPreview, ProofImage};
use crate::models::{PaymentType, Report, User};

#[derive(Properties, PartialEq)]
pub struct PreviewPanelProps {
    pub preview: GrantPreview,
    pub currency: AttrValue,
}

#[function_component(PreviewPanel)]
pub fn preview_panel(props: &PreviewPanelProps) -> Html {
    let preview = &props.preview;
    let row = |label: &'static str, value: Option<String>| {
        html! {
            <div class="flex justify-between text-sm py-1">
                <span class="text-gray-500">{label}</span>
                <span class="text-right">{value.unwrap_or_else(|| "—".to_string())}</span>
            </div>
        }
    };

    html! {
        <div class="p-4 bg-white rounded shadow space-y-1">
            <h2 class="text-xl font-bold mb-2">{"Preview"}</h2>
            {row("User", preview.user.as_ref().map(|(name, email)| format!("{} <{}>", name, email)))}
            {row("Access", Some(preview.access.to_string()))}
            {row("Item", preview.item.clone())}
            if let Some(detail) = &preview.detail {
                <p class="text-xs text-gray-500 text-right">{detail}</p>
            }
            {row("Amount", preview.amount.map(|a| format_money(&props.currency, a)))}
            {row("Proof", preview.proof.clone())}
            <p class={classes!("text-sm", "mt-2", if preview.ready { "text-green-600" } else { "text-gray-400" })}>
                {if preview.ready { "Ready to submit" } else { "Incomplete" }}
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GrantPageProps {
    pub api: Rc<ApiClient>,
    pub on_toast: Callback<Toast>,
}

pub enum Msg {
    Loaded(Result<(Vec<User>, Vec<Report>), ConsoleError>),
    SelectUser(Option<User>),
    SetAccessType(PaymentType),
    TogglePlan(AttrValue),
    ToggleReport(Report),
    FileChosen(File),
    ProofRead(u32, Result<ProofImage, GrantError>),
    ClearProof,
    Submit,
    Submitted(Result<(), ConsoleError>),
}

pub struct GrantPage {
    data: LoadState<(Vec<User>, Vec<Report>)>,
    form: GrantForm,
    reading_proof: bool,
    submitting: bool,
}

impl GrantPage {
    fn view_form(&self, ctx: &Context<Self>, users: &[User], reports: &[Report]) -> Html {
        let link = ctx.link();
        let currency: AttrValue = ctx.props().api.config().currency_symbol.clone().into();

        html! {
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="lg:col-span-2 space-y-6">
                    <section class="p-4 bg-white rounded shadow space-y-2">
                        <h2 class="text-xl font-bold">{"1. Select User"}</h2>
                        <UserSelector
                            users={users.to_vec()}
                            selected={self.form.user().cloned()}
                            on_select={link.callback(Msg::SelectUser)}
                        />
                    </section>

                    <section class="p-4 bg-white rounded shadow space-y-3">
                        <h2 class="text-xl font-bold">{"2. Choose Access"}</h2>
                        <AccessTypeToggle
                            value={self.form.access_type()}
                            on_change={link.callback(Msg::SetAccessType)}
                        />
                        {match self.form.access_type() {
                            PaymentType::Subscription => html! {
                                <PlanSelector
                                    selected={self.form.selected_plan().map(|p| AttrValue::from(p.id))}
                                    currency={currency.clone()}
                                    on_toggle={link.callback(Msg::TogglePlan)}
                                />
                            },
                            PaymentType::Report => html! {
                                <ReportSelector
                                    reports={reports.to_vec()}
                                    selected={self.form.selected_report().map(|r| AttrValue::from(r.id.clone()))}
                                    on_toggle={link.callback(Msg::ToggleReport)}
                                />
                            },
                        }}
                    </section>

                    <section class="p-4 bg-white rounded shadow space-y-2">
                        <h2 class="text-xl font-bold">{"3. Payment Proof"}</h2>
                        <FileDrop
                            proof={self.form.proof().cloned()}
                            busy={self.reading_proof}
                            on_file={link.callback(Msg::FileChosen)}
                            on_clear={link.callback(|_: ()| Msg::ClearProof)}
                        />
                    </section>
                </div>

                <div class="space-y-4">
                    <PreviewPanel preview={GrantPreview::compose(&self.form)} {currency} />
                    <button
                        onclick={link.callback(|_| Msg::Submit)}
                        disabled={self.submitting || self.reading_proof}
                        class="w-full px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 focus:outline-none disabled:opacity-50"
                    >
                        {if self.submitting { "Submitting..." } else { "Grant Access" }}
                    </button>
                </div>
            </div>
        }
    }
}

impl Component for GrantPage {
    type Message = Msg;
    type Properties = GrantPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api = ctx.props().api.clone();
        ctx.link().send_future(async move {
            let (users, reports) = join(api.list_users(), api.list_reports()).await;
            Msg::Loaded(users.and_then(|users| reports.map(|reports| (users, reports))))
        });
        Self {
            data: LoadState::Loading,
            form: GrantForm::default(),
            reading_proof: false,
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(data)) => {
                log::debug!("loaded {} users and {} reports", data.0.len(), data.1.len());
                self.data = LoadState::Loaded(data);
            }
            Msg::Loaded(Err(e)) => {
                log::error!("failed to load users or reports: {}", e);
                ctx.props().on_toast.emit(Toast::from(&e));
                self.data = LoadState::Failed(e.user_message());
            }
            Msg::SelectUser(user) => self.form.select_user(user),
            Msg::SetAccessType(access_type) => self.form.set_access_type(access_type),
            Msg::TogglePlan(id) => self.form.toggle_plan(&id),
            Msg::ToggleReport(report) => self.form.toggle_report(report),
            Msg::FileChosen(file) => {
                if self.reading_proof {
                    log::debug!("ignoring {} while another file is being read", file.name());
                    return false;
                }
                self.reading_proof = true;
                let ticket = self.form.begin_proof();
                ctx.link()
                    .send_future(async move { Msg::ProofRead(ticket, read_proof(file).await) });
            }
            Msg::ProofRead(ticket, result) => {
                self.reading_proof = false;
                match result {
                    Ok(proof) => {
                        if !self.form.finish_proof(ticket, proof) {
                            log::debug!("dropping proof read that finished after the form moved on");
                        }
                    }
                    Err(e) => {
                        log::warn!("proof rejected: {:?}", e);
                        ctx.props().on_toast.emit(Toast::error(e.to_string()));
                    }
                }
            }
            Msg::ClearProof => self.form.set_proof(None),
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                match self.form.validate() {
                    Ok(payload) => {
                        self.submitting = true;
                        let api = ctx.props().api.clone();
                        ctx.link().send_future(async move {
                            Msg::Submitted(api.submit_access_grant(&payload).await)
                        });
                    }
                    Err(e) => {
                        ctx.props().on_toast.emit(Toast::from(&ConsoleError::from(e)));
                        return false;
                    }
                }
            }
            Msg::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        log::info!("access grant submitted");
                        ctx.props()
                            .on_toast
                            .emit(Toast::success("Access grant submitted for approval"));
                        self.form.reset();
                    }
                    Err(e) => {
                        log::error!("failed to submit access grant: {}", e);
                        ctx.props().on_toast.emit(Toast::from(&e));
                    }
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.data {
            LoadState::Loading => html! {
                <p class="text-center text-gray-500">{"Loading users and reports..."}</p>
            },
            LoadState::Failed(message) => html! {
                <div class="p-4 bg-red-50 text-red-700 rounded">{message}</div>
            },
            LoadState::Loaded((users, reports)) => self.view_form(ctx, users, reports),
        }
    }
}
