use crate::bridge::Bridge;
use crm_core::list::{ListState, ListView, LoadTicket};
use crm_core::{validate_schema, EntityKind, EntitySchema, Record};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

fn dispatch_load(
    kind: EntityKind,
    state: RwSignal<ListState>,
    bridge: StoredValue<Bridge>,
    ticket: LoadTicket,
) {
    let bridge = bridge.get_value();
    spawn_local(async move {
        let result = bridge.fetch_records(kind, &ticket.search).await;
        // A disposed signal means the screen was left; drop the result.
        let _ = state.try_update(|s| s.finish_load(ticket, result));
    });
}

fn render_table(schema: EntitySchema, items: &[Record]) -> View {
    view! {
      <div class="table-wrap">
        <table>
          <thead>
            <tr>
              {schema.headers().into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
            </tr>
          </thead>
          <tbody>
            {items
                .iter()
                .map(|record| {
                    let cells = schema.cells(record);
                    view! {
                      <tr data-id=record.row_key()>
                        {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                      </tr>
                    }
                })
                .collect_view()}
          </tbody>
        </table>
      </div>
    }
    .into_view()
}

/// Search, quick-create and table for one entity type. State is private to
/// this instance and dropped when it unmounts.
#[component]
pub fn EntityList(
    kind: EntityKind,
    #[prop(optional, into)] on_created: Option<Callback<()>>,
) -> impl IntoView {
    let schema = kind.schema();
    if let Err(err) = validate_schema(&schema) {
        tracing::warn!("{} schema is invalid: {err}", kind.title());
    }
    let bridge = store_value(expect_context::<Bridge>());
    let on_created = store_value(on_created);
    let state = create_rw_signal(ListState::new());

    let load = move || {
        if let Some(ticket) = state.try_update(ListState::begin_load) {
            dispatch_load(kind, state, bridge, ticket);
        }
    };
    load();

    let create = move |_: ev::MouseEvent| {
        let Some(ticket) = state.try_update(ListState::begin_create) else {
            return;
        };
        let client = bridge.get_value();
        spawn_local(async move {
            let result = client.create_record(kind, &ticket.body).await;
            let reload = state.try_update(|s| s.finish_create(ticket, result)).flatten();
            if let Some(reload) = reload {
                on_created.with_value(|cb| {
                    if let Some(cb) = cb {
                        cb.call(());
                    }
                });
                dispatch_load(kind, state, bridge, reload);
            }
        });
    };

    let render_key = create_memo(move |_| state.with(ListState::render_key));
    let create_error =
        create_memo(move |_| state.with(|s| s.create_error().map(ToString::to_string)));

    let inputs = schema
        .fields
        .iter()
        .map(|field| {
            let name = field.name;
            view! {
              <input
                prop:value=move || state.with(|s| s.draft_value(name).to_string())
                on:input=move |ev| state.update(|s| s.set_draft_field(name, event_target_value(&ev)))
                placeholder=field.input_placeholder()
              />
            }
        })
        .collect_view();

    view! {
      <section class="panel">
        <div class="list-header">
          <h2>{kind.title()}</h2>
          <div class="row">
            <input
              prop:value=move || state.with(|s| s.search().to_string())
              on:input=move |ev| state.update(|s| s.set_search(event_target_value(&ev)))
              placeholder="Search..."
            />
            <button on:click=move |_| load()>"Search"</button>
          </div>
        </div>

        <div class="quick-create">
          <h3>"Quick Create"</h3>
          <div class="grid">
            {inputs}
            <button class="add" on:click=create>"Add"</button>
          </div>
          {move || create_error.get().map(|msg| view! { <p class="error">{msg}</p> })}
        </div>

        {move || {
            // Keystrokes in the search box or draft form don't rebuild the table.
            render_key.with(|_| ());
            state.with_untracked(|s| match s.view() {
                ListView::Loading => view! { <p class="muted">"Loading..."</p> }.into_view(),
                ListView::Error(msg) => view! { <p class="error">{msg.to_string()}</p> }.into_view(),
                ListView::Table(items) => render_table(schema, items),
            })
        }}
      </section>
    }
}
