use crate::storage::BrowserSession;
use crm_core::routing::{guard, Access, Route};
use leptos::*;
use leptos_router::{NavigateOptions, Redirect};

/// Renders `children` only for a signed-in session; checked on every mount.
#[component]
pub fn Protected(children: Children) -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    match guard(Route::Root, &session) {
        Access::Render => children().into_view(),
        Access::Redirect(to) => view! {
          <Redirect
            path=to.path()
            options=NavigateOptions {
                replace: true,
                ..Default::default()
            }
          />
        }
        .into_view(),
    }
}
