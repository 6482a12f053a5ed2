use crate::storage::BrowserSession;
use crm_core::routing::Tab;
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};

fn sign_out(session: &BrowserSession, navigate: &impl Fn(&str, NavigateOptions)) {
    let login = session.logout().path();
    let forced = web_sys::window().map(|w| w.location().set_href(login));
    if !matches!(forced, Some(Ok(()))) {
        navigate(
            login,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    }
}

#[component]
pub fn Navbar(current: RwSignal<Tab>) -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let user_name = session.display_name();
    let menu_open = create_rw_signal(false);
    let navigate = use_navigate();

    let logout = move |_: ev::MouseEvent| sign_out(&session, &navigate);
    let logout_menu = logout.clone();

    let tab_buttons = move |close_menu: bool| {
        Tab::ALL
            .iter()
            .copied()
            .map(|tab| {
                view! {
                  <button
                    class=move || if current.get() == tab { "tab active" } else { "tab" }
                    on:click=move |_| {
                        current.set(tab);
                        if close_menu {
                            menu_open.set(false);
                        }
                    }
                  >
                    {tab.label()}
                  </button>
                }
            })
            .collect_view()
    };

    view! {
      <header class="navbar">
        <div class="brand">
          <img src="/flame-icon.svg" alt="logo"/>
          <span>"Flames CRM"</span>
        </div>
        <nav class="tabs">
          {tab_buttons(false)}
          <div class="user">
            <span>{user_name}</span>
            <button class="link" on:click=logout>"Logout"</button>
          </div>
        </nav>
        <button class="menu-toggle" on:click=move |_| menu_open.update(|open| *open = !*open)>
          "☰"
        </button>
        <Show when=move || menu_open.get() fallback=|| ()>
          <div class="mobile-menu">
            {tab_buttons(true)}
            <button class="link" on:click=logout_menu.clone()>"Logout"</button>
          </div>
        </Show>
      </header>
    }
}
