use crate::bridge::Bridge;
use crate::components::auth_form::AuthPage;
use crate::components::entity_list::EntityList;
use crate::components::navbar::Navbar;
use crate::components::overview::OverviewPanel;
use crate::components::protected::Protected;
use crate::storage::{BrowserSession, BrowserStorage};
use crm_core::auth::AuthMode;
use crm_core::config::CrmConfig;
use crm_core::routing::{Route as AppRoute, Tab};
use leptos::*;
use leptos_router::*;

#[component]
pub fn App() -> impl IntoView {
    let config = CrmConfig::from_build_env();
    tracing::info!("using backend {}", config.backend_url);

    let session = BrowserSession::new(BrowserStorage);
    provide_context(Bridge::new(&config, session.clone()));
    provide_context(session);

    view! {
      <Router>
        <Routes>
          <Route
            path=AppRoute::Root.path()
            view=|| view! { <Protected><Shell/></Protected> }
          />
          <Route
            path=AppRoute::Login.path()
            view=|| view! { <AuthPage mode=AuthMode::Login/> }
          />
          <Route
            path=AppRoute::Signup.path()
            view=|| view! { <AuthPage mode=AuthMode::Signup/> }
          />
        </Routes>
      </Router>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let tab = create_rw_signal(Tab::default());

    view! {
      <div class="app">
        <Navbar current=tab/>
        <main class="content">
          {move || match tab.get().entity() {
            Some(kind) => view! { <EntityList kind=kind/> }.into_view(),
            None => view! { <OverviewPanel/> }.into_view(),
          }}
        </main>
      </div>
    }
}
