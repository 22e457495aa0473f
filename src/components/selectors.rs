//! Selection widgets of the grant-access form. Each one only reports user
//! choices upward; the form state lives in the page.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::config::format_money;
use crate::grant::{filter_reports, filter_users};
use crate::models::{PaymentType, Report, ReportType, User, PLAN_CATALOG};

fn search_input(value: &str, placeholder: &'static str, on_input: Callback<String>) -> Html {
    html! {
        <input
            type="text"
            value={value.to_string()}
            oninput={on_input.reform(|e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                input.value()
            })}
            class="w-full px-3 py-2 border rounded focus:outline-none focus:border-blue-500"
            {placeholder}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct UserSelectorProps {
    pub users: Vec<User>,
    pub selected: Option<User>,
    pub on_select: Callback<Option<User>>,
}

#[function_component(UserSelector)]
pub fn user_selector(props: &UserSelectorProps) -> Html {
    let search = use_state(String::new);
    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };

    if let Some(user) = &props.selected {
        let on_select = props.on_select.clone();
        return html! {
            <div class="flex items-center justify-between p-3 bg-blue-50 rounded">
                <div class="flex items-center">
                    <span class="w-8 h-8 mr-3 flex items-center justify-center rounded-full bg-blue-500 text-white text-sm">
                        {user.initials()}
                    </span>
                    <div>
                        <p class="font-medium">{user.full_name()}</p>
                        <p class="text-xs text-gray-500">{&user.email}</p>
                    </div>
                </div>
                <button
                    onclick={Callback::from(move |_: MouseEvent| on_select.emit(None))}
                    class="text-sm text-gray-500 hover:text-gray-700"
                >
                    {"Change"}
                </button>
            </div>
        };
    }

    let matches = filter_users(&props.users, &search);
    html! {
        <div class="space-y-2">
            {search_input(&search, "Search users by name or email", on_search)}
            <ul class="max-h-60 overflow-auto border rounded divide-y">
                if matches.is_empty() {
                    <li class="p-3 text-sm text-gray-500">{"No users found"}</li>
                }
                {for matches.into_iter().map(|user| {
                    let on_select = props.on_select.clone();
                    let picked = user.clone();
                    html! {
                        <li
                            key={user.id.clone()}
                            class="p-3 cursor-pointer hover:bg-gray-100"
                            onclick={Callback::from(move |_: MouseEvent| on_select.emit(Some(picked.clone())))}
                        >
                            <p class="text-sm font-medium">{user.full_name()}</p>
                            <p class="text-xs text-gray-500">{&user.email}</p>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AccessTypeToggleProps {
    pub value: PaymentType,
    pub on_change: Callback<PaymentType>,
}

#[function_component(AccessTypeToggle)]
pub fn access_type_toggle(props: &AccessTypeToggleProps) -> Html {
    html! {
        <div class="flex space-x-2">
            {for [PaymentType::Subscription, PaymentType::Report].into_iter().map(|kind| {
                let on_change = props.on_change.clone();
                let active = kind == props.value;
                html! {
                    <button
                        type="button"
                        onclick={Callback::from(move |_: MouseEvent| on_change.emit(kind))}
                        class={classes!(
                            "flex-1", "px-4", "py-2", "rounded", "border", "focus:outline-none",
                            if active { "bg-blue-500 text-white border-blue-500" } else { "bg-white text-gray-700" }
                        )}
                    >
                        {format!("{} Access", kind.label())}
                    </button>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PlanSelectorProps {
    pub selected: Option<AttrValue>,
    pub currency: AttrValue,
    pub on_toggle: Callback<AttrValue>,
}

#[function_component(PlanSelector)]
pub fn plan_selector(props: &PlanSelectorProps) -> Html {
    html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
            {for PLAN_CATALOG.iter().map(|plan| {
                let active = props.selected.as_deref() == Some(plan.id);
                let on_toggle = props.on_toggle.clone();
                let id = AttrValue::from(plan.id);
                html! {
                    <div
                        key={plan.id}
                        onclick={Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))}
                        class={classes!(
                            "p-4", "border", "rounded", "cursor-pointer",
                            if active { "border-blue-500 bg-blue-50" } else { "hover:border-gray-400" }
                        )}
                    >
                        <div class="flex justify-between">
                            <p class="font-bold">{plan.name}</p>
                            <p class="font-mono">{format_money(&props.currency, plan.price)}</p>
                        </div>
                        <p class="text-xs text-gray-500">{format!("{} month(s)", plan.duration)}</p>
                        <p class="text-xs text-gray-600 mt-1">
                            {format!(
                                "{} reports · {} premium · {} bluechip",
                                plan.total_reports, plan.premium_reports, plan.bluechip_reports
                            )}
                        </p>
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReportSelectorProps {
    pub reports: Vec<Report>,
    pub selected: Option<AttrValue>,
    pub on_toggle: Callback<Report>,
}

#[function_component(ReportSelector)]
pub fn report_selector(props: &ReportSelectorProps) -> Html {
    let search = use_state(String::new);
    let type_filter = use_state(|| None::<ReportType>);

    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };
    let on_type = {
        let type_filter = type_filter.clone();
        Callback::from(move |e: Event| {
            let select = e.target_unchecked_into::<HtmlSelectElement>();
            type_filter.set(ReportType::parse(&select.value()));
        })
    };

    let matches = filter_reports(&props.reports, &search, *type_filter);
    html! {
        <div class="space-y-2">
            <div class="flex gap-2">
                <div class="flex-1">{search_input(&search, "Search reports by title or sector", on_search)}</div>
                <select
                    class="px-3 py-2 border rounded focus:outline-none focus:border-blue-500"
                    onchange={on_type}
                >
                    <option value="">{"All types"}</option>
                    {for ReportType::ALL.iter().map(|t| html! {
                        <option value={t.label().to_lowercase()}>{t.label()}</option>
                    })}
                </select>
            </div>
            <ul class="max-h-72 overflow-auto border rounded divide-y">
                if matches.is_empty() {
                    <li class="p-3 text-sm text-gray-500">{"No reports found"}</li>
                }
                {for matches.into_iter().map(|report| {
                    let active = props.selected.as_deref() == Some(report.id.as_str());
                    let on_toggle = props.on_toggle.clone();
                    let picked = report.clone();
                    html! {
                        <li
                            key={report.id.clone()}
                            onclick={Callback::from(move |_: MouseEvent| on_toggle.emit(picked.clone()))}
                            class={classes!(
                                "p-3", "cursor-pointer", "flex", "justify-between", "items-center",
                                if active { "bg-blue-50" } else { "hover:bg-gray-100" }
                            )}
                        >
                            <div>
                                <p class="text-sm font-medium">{&report.title}</p>
                                <p class="text-xs text-gray-500">{format!("{} · {}", report.sector, report.category)}</p>
                            </div>
                            <span class={classes!("text-xs", "px-2", "py-1", "rounded", report.report_type.badge_class())}>
                                {report.report_type.label()}
                            </span>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}
