use crate::bridge::Bridge;
use crm_core::overview::OverviewState;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
fn Stat(title: &'static str, value: u64) -> impl IntoView {
    view! {
      <div class="stat">
        <p class="muted">{title}</p>
        <p class="stat-value">{value}</p>
      </div>
    }
}

/// Dashboard totals; fetched once per mount.
#[component]
pub fn OverviewPanel() -> impl IntoView {
    let bridge = expect_context::<Bridge>();
    let state = create_rw_signal(OverviewState::default());

    spawn_local(async move {
        let result = bridge.fetch_overview().await;
        let _ = state.try_update(|s| s.finish(result));
    });

    view! {
      <section class="panel">
        <h2>"Dashboard"</h2>
        {move || state.with(|s| s.error.clone()).map(|e| view! { <p class="error">{e}</p> })}
        {move || state.with(|s| match &s.data {
            Some(data) => view! {
              <div class="stats">
                {data
                    .stats()
                    .into_iter()
                    .map(|(title, value)| view! { <Stat title=title value=value/> })
                    .collect_view()}
              </div>
            }
            .into_view(),
            None if s.is_loading() => view! { <p class="muted">"Loading..."</p> }.into_view(),
            None => ().into_view(),
        })}
        {move || {
            state.with(|s| s.pipeline().map(<[_]>::to_vec)).map(|rows| {
                view! {
                  <div class="pipeline">
                    <h3>"Leads by Status"</h3>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                          <div class="pipeline-row">
                            <span class="capitalize">{row.status}</span>
                            <b>{row.count}</b>
                          </div>
                        })
                        .collect_view()}
                  </div>
                }
            })
        }}
      </section>
    }
}
