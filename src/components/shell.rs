//! Route-driven chrome around every page: header, sidebar and the mobile
//! navigation drawer. None of it holds business state.

use yew::prelude::*;

use crate::route::Route;

#[derive(Properties, PartialEq)]
pub struct NavLinksProps {
    pub current: Route,
    pub on_navigate: Callback<Route>,
}

#[function_component(NavLinks)]
pub fn nav_links(props: &NavLinksProps) -> Html {
    html! {
        <nav class="space-y-1">
            {for Route::NAV.iter().map(|&route| {
                let on_navigate = props.on_navigate.clone();
                let active = route == props.current;
                let onclick = Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    on_navigate.emit(route);
                });
                html! {
                    <a
                        href={route.path()}
                        {onclick}
                        class={classes!(
                            "flex", "items-center", "px-3", "py-2", "rounded", "text-sm",
                            if active { "bg-blue-600 text-white" } else { "text-gray-700 hover:bg-gray-100" }
                        )}
                    >
                        <span class="mr-3">{route.icon()}</span>
                        {route.title()}
                    </a>
                }
            })}
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current: Route,
    pub on_navigate: Callback<Route>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <aside class="hidden md:flex md:flex-col w-64 bg-white border-r min-h-screen p-4">
            <div class="text-xl font-bold mb-6">{"Report Admin"}</div>
            <NavLinks current={props.current} on_navigate={props.on_navigate.clone()} />
        </aside>
    }
}

#[derive(Properties, PartialEq)]
pub struct MobileDrawerProps {
    pub open: bool,
    pub current: Route,
    pub on_navigate: Callback<Route>,
    pub on_close: Callback<()>,
}

#[function_component(MobileDrawer)]
pub fn mobile_drawer(props: &MobileDrawerProps) -> Html {
    if !props.open {
        return html! {};
    }
    let close = props.on_close.reform(|_: MouseEvent| ());
    // Picking an entry also closes the drawer.
    let on_navigate = {
        let on_navigate = props.on_navigate.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |route: Route| {
            on_close.emit(());
            on_navigate.emit(route);
        })
    };

    html! {
        <div class="fixed inset-0 z-40 md:hidden">
            <div class="absolute inset-0 bg-black bg-opacity-50" onclick={close.clone()}></div>
            <div class="absolute left-0 top-0 bottom-0 w-64 bg-white p-4 shadow-lg">
                <div class="flex justify-between items-center mb-6">
                    <span class="text-xl font-bold">{"Report Admin"}</span>
                    <button onclick={close} class="text-gray-500 hover:text-gray-700">{"✕"}</button>
                </div>
                <NavLinks current={props.current} {on_navigate} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub title: AttrValue,
    pub on_menu: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="flex items-center justify-between bg-white border-b px-4 py-3">
            <div class="flex items-center">
                <button
                    onclick={props.on_menu.reform(|_: MouseEvent| ())}
                    class="md:hidden mr-3 px-2 py-1 rounded hover:bg-gray-100"
                >
                    {"☰"}
                </button>
                <h1 class="text-lg font-semibold">{props.title.clone()}</h1>
            </div>
            <button
                onclick={props.on_logout.reform(|_: MouseEvent| ())}
                class="px-4 py-2 text-sm bg-gray-500 text-white rounded hover:bg-gray-600 focus:outline-none"
            >
                {"Logout"}
            </button>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub current: Route,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let drawer_open = use_state(|| false);
    let open_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |_: ()| drawer_open.set(true))
    };
    let close_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |_: ()| drawer_open.set(false))
    };

    html! {
        <div class="flex min-h-screen bg-gray-50">
            <Sidebar current={props.current} on_navigate={props.on_navigate.clone()} />
            <MobileDrawer
                open={*drawer_open}
                current={props.current}
                on_navigate={props.on_navigate.clone()}
                on_close={close_drawer}
            />
            <div class="flex-1 flex flex-col">
                <Header
                    title={props.current.title()}
                    on_menu={open_drawer}
                    on_logout={props.on_logout.clone()}
                />
                <main class="p-4 md:p-6">
                    {props.children.clone()}
                </main>
            </div>
        </div>
    }
}
