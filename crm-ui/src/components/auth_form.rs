use crate::bridge::{Bridge, Credentials};
use crm_core::auth::{AuthForm, AuthMode};
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::spawn_local;

#[component]
fn TextInput(
    label: &'static str,
    value: RwSignal<String>,
    placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
      <div class="field">
        <label>{label}</label>
        <input
          type=input_type
          prop:value=move || value.get()
          on:input=move |ev| value.set(event_target_value(&ev))
          placeholder=placeholder
        />
      </div>
    }
}

/// Login or signup page. Submit is disabled until the request settles.
#[component]
pub fn AuthPage(mode: AuthMode) -> impl IntoView {
    let bridge = store_value(expect_context::<Bridge>());
    let form = create_rw_signal(AuthForm::default());
    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let navigate = use_navigate();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(AuthForm::begin).unwrap_or(false) {
            return;
        }
        let bridge = bridge.get_value();
        let navigate = navigate.clone();
        let creds = Credentials {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            let result = bridge.authenticate(mode, &creds).await;
            let next = form
                .try_update(|f| f.finish(mode, result, bridge.session()))
                .flatten();
            if let Some(route) = next {
                navigate(route.path(), Default::default());
            }
        });
    };

    let submitting = move || form.with(|f| f.submitting);
    let (prompt, link_text, other) = mode.switch_link();

    view! {
      <div class="auth-shell">
        <div class="auth-card">
          <div class="brand">
            <img src="/flame-icon.svg" alt="logo"/>
            <h1>"Flames CRM"</h1>
          </div>
          <h2>{mode.title()}</h2>
          <p class="muted">{mode.subtitle()}</p>
          <form class="stack" on:submit=on_submit>
            {(mode == AuthMode::Signup)
                .then(|| view! { <TextInput label="Full name" value=name placeholder="Jane Doe"/> })}
            <TextInput label="Email" value=email placeholder="you@example.com"/>
            <TextInput
              label="Password"
              input_type="password"
              value=password
              placeholder="••••••••"
            />
            {move || form.with(|f| f.error.clone()).map(|e| view! { <p class="error">{e}</p> })}
            <button type="submit" disabled=submitting>
              {move || mode.submit_label(submitting())}
            </button>
          </form>
          <p class="muted">{prompt} " " <A href=other.path()>{link_text}</A></p>
        </div>
      </div>
    }
}
