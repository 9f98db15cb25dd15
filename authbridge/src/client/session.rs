use std::cell::RefCell;
use std::rc::{Rc, Weak};

const OUTSIDE_PROVIDER: &str = "SessionHandle used outside of a mounted SessionProvider";

/// Who is signed in, as far as the UI knows.
///
/// Lives in memory only: every new provider starts unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClientSession {
    #[default]
    Unauthenticated,
    Authenticated { display_name: String },
}

impl ClientSession {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            ClientSession::Unauthenticated => None,
            ClientSession::Authenticated { display_name } => Some(display_name.as_str()),
        }
    }
}

/// Owns the session state for one UI tree.
///
/// Mount it at the composition root and pass [`SessionHandle`]s down.
/// Dropping the provider tears the session down with it.
#[derive(Debug, Default)]
pub struct SessionProvider {
    state: Rc<RefCell<ClientSession>>,
}

impl SessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            state: Rc::downgrade(&self.state),
        }
    }
}

/// Cheap, cloneable access to a provider's session.
///
/// # Panics
///
/// Every method panics once the owning [`SessionProvider`] has been dropped.
/// That is a wiring bug in the caller, not a recoverable condition.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Weak<RefCell<ClientSession>>,
}

impl SessionHandle {
    fn state(&self) -> Rc<RefCell<ClientSession>> {
        self.state.upgrade().expect(OUTSIDE_PROVIDER)
    }

    pub fn current(&self) -> ClientSession {
        self.state().borrow().clone()
    }

    pub fn display_name(&self) -> Option<String> {
        self.state().borrow().display_name().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state().borrow(), ClientSession::Authenticated { .. })
    }

    /// The only way the session changes. Last write wins.
    pub fn set_display_name(&self, display_name: Option<String>) {
        let next = match display_name {
            Some(display_name) => ClientSession::Authenticated { display_name },
            None => ClientSession::Unauthenticated,
        };

        *self.state().borrow_mut() = next;
    }

    pub fn logout(&self) {
        self.set_display_name(None);
    }
}
