//! Per-screen list controller: search, quick-create and reload.
//!
//! Dispatch and resolution are split (`begin_*` / `finish_*`) so the UI owns
//! the actual request. Every load carries a sequence number and only the
//! latest issued sequence may write results.

use crate::error::{ApiError, Operation};
use entity_registry::Record;
use std::collections::BTreeMap;

pub type Draft = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub search: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTicket {
    pub body: Draft,
    /// Search term active when the create was submitted.
    pub search: String,
}

#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Table(&'a [Record]),
}

/// The parts of [`ListState`] the table depends on. Typing into the search
/// box or the draft form leaves it unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderKey {
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

#[derive(Clone, Debug, Default)]
pub struct ListState {
    items: Vec<Record>,
    loading: bool,
    error: Option<String>,
    create_error: Option<String>,
    search: String,
    draft: Draft,
    latest_seq: u64,
    revision: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last quick-create failure. Loads never clear it.
    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_value(&self, field: &str) -> &str {
        self.draft.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn set_draft_field(&mut self, field: &str, value: impl Into<String>) {
        self.draft.insert(field.to_string(), value.into());
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        let term = self.search.clone();
        self.begin_load_with(term)
    }

    pub fn begin_load_with(&mut self, search: String) -> LoadTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket {
            seq: self.latest_seq,
            search,
        }
    }

    /// Applies a load result unless a newer load has been issued since.
    /// Returns whether the result was applied.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, ApiError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                "discarding superseded load #{} (latest #{})",
                ticket.seq,
                self.latest_seq
            );
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                tracing::debug!("load #{} failed: {err}", ticket.seq);
                self.error = Some(err.user_message(Operation::Load));
            }
        }
        self.loading = false;
        self.revision += 1;
        true
    }

    pub fn begin_create(&mut self) -> CreateTicket {
        self.create_error = None;
        CreateTicket {
            body: self.draft.clone(),
            search: self.search.clone(),
        }
    }

    /// On success clears the draft and returns the reload to dispatch.
    pub fn finish_create(
        &mut self,
        ticket: CreateTicket,
        result: Result<(), ApiError>,
    ) -> Option<LoadTicket> {
        match result {
            Ok(()) => {
                self.draft.clear();
                self.create_error = None;
                Some(self.begin_load_with(ticket.search))
            }
            Err(err) => {
                tracing::debug!("create failed: {err}");
                self.create_error = Some(err.user_message(Operation::Create));
                None
            }
        }
    }

    pub fn view(&self) -> ListView<'_> {
        if self.loading {
            return ListView::Loading;
        }
        match &self.error {
            Some(err) => ListView::Error(err),
            None => ListView::Table(&self.items),
        }
    }

    pub fn render_key(&self) -> RenderKey {
        RenderKey {
            loading: self.loading,
            error: self.error.clone(),
            revision: self.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_registry::EntityKind;

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter()
            .map(|id| {
                serde_json::from_value(serde_json::json!({"id": id, "name": id}))
                    .expect("record")
            })
            .collect()
    }

    fn failed(status: u16) -> ApiError {
        ApiError::Http {
            status,
            detail: None,
        }
    }

    #[test]
    fn load_sets_loading_then_items() {
        let mut state = ListState::new();
        let ticket = state.begin_load();
        assert_eq!(ticket.search, "");
        assert_eq!(state.view(), ListView::Loading);

        assert!(state.finish_load(ticket, Ok(records(&["a", "b"]))));

        assert!(!state.is_loading());
        assert_eq!(state.items().len(), 2);
        assert!(matches!(state.view(), ListView::Table(rows) if rows.len() == 2));
    }

    #[test]
    fn load_replaces_rather_than_merges() {
        let mut state = ListState::new();
        let t = state.begin_load();
        state.finish_load(t, Ok(records(&["a", "b"])));
        let t = state.begin_load();
        state.finish_load(t, Ok(records(&["c"])));

        assert_eq!(state.items(), records(&["c"]).as_slice());
    }

    #[test]
    fn empty_result_is_an_empty_table() {
        let mut state = ListState::new();
        state.set_search("foo");
        let t = state.begin_load();
        state.finish_load(t, Ok(Vec::new()));

        assert_eq!(state.view(), ListView::Table(&[]));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failure_shows_error_instead_of_table() {
        let mut state = ListState::new();
        let t = state.begin_load();
        state.finish_load(t, Ok(records(&["a"])));
        let t = state.begin_load();
        state.finish_load(t, Err(failed(500)));

        assert_eq!(state.view(), ListView::Error("Failed: 500"));
    }

    #[test]
    fn loading_takes_precedence_over_stale_error() {
        let mut state = ListState::new();
        let t = state.begin_load();
        state.finish_load(t, Err(failed(502)));
        let _pending = state.begin_load();

        assert_eq!(state.error(), None);
        assert_eq!(state.view(), ListView::Loading);
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut state = ListState::new();
        let mount = state.begin_load();
        state.set_search("acme");
        let search = state.begin_load();

        assert!(state.finish_load(search, Ok(records(&["acme"]))));
        assert!(!state.finish_load(mount, Ok(records(&["x", "y", "z"]))));

        assert_eq!(state.items(), records(&["acme"]).as_slice());
        assert!(!state.is_loading());
    }

    #[test]
    fn superseded_result_does_not_end_newer_loading() {
        let mut state = ListState::new();
        let first = state.begin_load();
        let _second = state.begin_load();

        assert!(!state.finish_load(first, Err(failed(500))));
        assert_eq!(state.view(), ListView::Loading);
    }

    #[test]
    fn hung_request_keeps_loading() {
        let mut state = ListState::new();
        let _never_resolves = state.begin_load();
        state.set_search("still typing");
        assert!(state.is_loading());
        assert_eq!(state.view(), ListView::Loading);
    }

    #[test]
    fn create_success_clears_draft_and_reloads_with_active_search() {
        let mut state = ListState::new();
        state.set_search("acme");
        state.set_draft_field("name", "Acme Corp");
        state.set_draft_field("stage", "lead");

        let ticket = state.begin_create();
        assert_eq!(ticket.body.get("name").map(String::as_str), Some("Acme Corp"));

        let reload = state.finish_create(ticket, Ok(())).expect("reload");

        assert!(state.draft().is_empty());
        assert_eq!(reload.search, "acme");
        assert!(state.is_loading());
    }

    #[test]
    fn create_failure_keeps_draft() {
        let mut state = ListState::new();
        state.set_draft_field("subject", "Printer on fire");

        let ticket = state.begin_create();
        assert_eq!(state.finish_create(ticket, Err(failed(422))), None);

        assert_eq!(state.draft_value("subject"), "Printer on fire");
        assert_eq!(state.create_error(), Some("Create failed"));
    }

    #[test]
    fn create_error_survives_pending_load() {
        let mut state = ListState::new();
        let mount = state.begin_load();
        let ticket = state.begin_create();
        assert_eq!(state.finish_create(ticket, Err(failed(500))), None);

        assert!(state.finish_load(mount, Ok(Vec::new())));

        assert_eq!(state.create_error(), Some("Create failed"));
        assert_eq!(state.view(), ListView::Table(&[]));
    }

    #[test]
    fn next_create_clears_previous_create_error() {
        let mut state = ListState::new();
        let ticket = state.begin_create();
        state.finish_create(ticket, Err(failed(500)));

        let ticket = state.begin_create();
        assert_eq!(state.create_error(), None);
        state.finish_create(ticket, Ok(()));
        assert_eq!(state.create_error(), None);
    }

    #[test]
    fn typing_leaves_render_key_unchanged() {
        let mut state = ListState::new();
        let t = state.begin_load();
        state.finish_load(t, Ok(records(&["a"])));
        let before = state.render_key();

        state.set_search("ac");
        state.set_draft_field("name", "Acme");
        assert_eq!(state.render_key(), before);

        let t = state.begin_load();
        assert_ne!(state.render_key(), before);
        state.finish_load(t, Ok(records(&["a"])));
        assert_ne!(state.render_key(), before);
    }

    #[test]
    fn discarded_load_leaves_render_key_unchanged() {
        let mut state = ListState::new();
        let stale = state.begin_load();
        let _latest = state.begin_load();
        let before = state.render_key();

        assert!(!state.finish_load(stale, Ok(records(&["x"]))));
        assert_eq!(state.render_key(), before);
    }

    #[test]
    fn rows_follow_schema_order_with_placeholders() {
        let schema = EntityKind::Customers.schema();
        let mut state = ListState::new();
        let t = state.begin_load();
        let rows: Vec<Record> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Jane", "email": "jane@example.com"}
        ]))
        .expect("rows");
        state.finish_load(t, Ok(rows));

        let ListView::Table(items) = state.view() else {
            panic!("expected table");
        };
        assert_eq!(schema.cells(&items[0]), ["Jane", "-", "jane@example.com", "-"]);
    }
}
