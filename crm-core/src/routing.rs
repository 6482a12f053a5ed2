use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use entity_registry::EntityKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Signup,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Root)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Route),
}

/// Consulted on every navigation; nothing is cached between calls.
pub fn guard<S: KeyValueStore>(route: Route, session: &SessionStore<S>) -> Access {
    if route.requires_session() && !session.is_authenticated() {
        tracing::debug!("redirecting {} to login", route.path());
        return Access::Redirect(Route::Login);
    }
    Access::Render
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Customers,
    Leads,
    Activities,
    Tickets,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Customers,
        Tab::Leads,
        Tab::Activities,
        Tab::Tickets,
    ];

    pub fn label(self) -> &'static str {
        match self.entity() {
            Some(kind) => kind.title(),
            None => "Overview",
        }
    }

    pub fn entity(self) -> Option<EntityKind> {
        match self {
            Tab::Overview => None,
            Tab::Customers => Some(EntityKind::Customers),
            Tab::Leads => Some(EntityKind::Leads),
            Tab::Activities => Some(EntityKind::Activities),
            Tab::Tickets => Some(EntityKind::Tickets),
        }
    }
}
