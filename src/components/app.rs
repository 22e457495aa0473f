use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::dashboard_page::DashboardPage;
use super::grant_page::GrantPage;
use super::requests_page::RequestsPage;
use super::shell::Layout;
use super::toast::{Toast, ToastList};
use crate::api::ApiClient;
use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::route::{transition, NavigationSource, PopStateListener, Route, Transition};
use crate::storage::LocalStorageTokenStore;

pub enum Msg {
    Navigate(Route),
    HistoryChanged(Route),
    ShowToast(Toast),
    DismissToast(u32),
    Logout,
}

/// Root component. Builds the API client (and with it the session
/// credentials) once and threads it to every page.
pub struct App {
    api: Rc<ApiClient>,
    route: Route,
    toasts: Vec<Toast>,
    next_toast_id: u32,
    _history: Option<PopStateListener>,
}

impl App {
    fn go(&mut self, route: Route, source: NavigationSource) -> bool {
        match transition(self.route, route, source) {
            Transition::Stay => false,
            Transition::Go { push } => {
                if push {
                    route.push();
                }
                self.route = route;
                true
            }
        }
    }

    fn view_page(&self, ctx: &Context<Self>) -> Html {
        let api = self.api.clone();
        let on_toast = ctx.link().callback(Msg::ShowToast);

        if !api.auth().is_authenticated() {
            return html! {
                <div class="max-w-md mx-auto mt-16 p-6 bg-white rounded shadow text-center space-y-4">
                    <p class="text-lg font-bold">{"You are signed out"}</p>
                    <a
                        href={api.config().login_url.clone()}
                        class="inline-block px-6 py-2 bg-blue-500 text-white rounded hover:bg-blue-600"
                    >
                        {"Sign in"}
                    </a>
                </div>
            };
        }

        match self.route {
            Route::Dashboard => html! { <DashboardPage {api} {on_toast} /> },
            Route::Requests => html! { <RequestsPage {api} {on_toast} /> },
            Route::GrantAccess => html! { <GrantPage {api} {on_toast} /> },
            Route::NotFound => html! {
                <div class="text-center text-gray-500 py-16">{"Page not found"}</div>
            },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = AppConfig::from_env().unwrap_or_else(|e| {
            log::error!("{}, using defaults", e);
            AppConfig::default()
        });
        let auth = AuthContext::load(&LocalStorageTokenStore);
        if !auth.is_authenticated() {
            log::warn!("no auth token in storage");
        }

        Self {
            api: Rc::new(ApiClient::new(config, auth)),
            route: Route::current(),
            toasts: Vec::new(),
            next_toast_id: 0,
            _history: PopStateListener::register({
                let link = ctx.link().clone();
                move |route| link.send_message(Msg::HistoryChanged(route))
            }),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => self.go(route, NavigationSource::Link),
            Msg::HistoryChanged(route) => self.go(route, NavigationSource::History),
            Msg::ShowToast(mut toast) => {
                let id = self.next_toast_id;
                self.next_toast_id = self.next_toast_id.wrapping_add(1);
                toast.id = id;
                self.toasts.push(toast);

                let link = ctx.link().clone();
                Timeout::new(self.api.config().toast_duration_ms, move || {
                    link.send_message(Msg::DismissToast(id));
                })
                .forget();
                true
            }
            Msg::DismissToast(id) => {
                let before = self.toasts.len();
                self.toasts.retain(|toast| toast.id != id);
                self.toasts.len() != before
            }
            Msg::Logout => {
                let mut auth = self.api.auth().clone();
                if let Err(e) = auth.clear(&LocalStorageTokenStore) {
                    log::warn!("failed to clear stored tokens: {}", e);
                }
                let config = self.api.config().clone();
                log::info!("logged out");

                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().set_href(&config.login_url) {
                        log::warn!("redirect to login failed: {:?}", e);
                    }
                }
                self.api = Rc::new(ApiClient::new(config, auth));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <Layout
                    current={self.route}
                    on_navigate={ctx.link().callback(Msg::Navigate)}
                    on_logout={ctx.link().callback(|_: ()| Msg::Logout)}
                >
                    {self.view_page(ctx)}
                </Layout>
                <ToastList
                    toasts={self.toasts.clone()}
                    on_dismiss={ctx.link().callback(Msg::DismissToast)}
                />
            </>
        }
    }
}
