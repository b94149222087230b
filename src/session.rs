//! Bearer-token session shared by every resource of one client.

use std::cell::RefCell;
use std::rc::Rc;

/// Holder of the current access token.
///
/// Cloning a `Session` yields another handle to the same token, so a token set through
/// any handle is immediately visible to all of them. The handle is `!Send`: a client and
/// its resources belong to the thread that built them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    access_token: Rc<RefCell<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_access_token(token);
        session
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.borrow().clone()
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        *self.access_token.borrow_mut() = Some(token.into());
    }

    pub fn clear(&self) {
        self.access_token.borrow_mut().take();
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.borrow().is_some()
    }

    /// True when both handles point at the same token slot.
    pub fn shares_state_with(&self, other: &Session) -> bool {
        Rc::ptr_eq(&self.access_token, &other.access_token)
    }
}
