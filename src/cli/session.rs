//! Shell session state

use crate::{
    models::{User, UserId},
    services::Catalog,
};

/// Who is acting in the shell, if anyone.
///
/// A freshly registered user holds the session without being authenticated
/// until they log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    NoSession,
    LoggedIn(UserId),
}

impl Session {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Session::NoSession => None,
            Session::LoggedIn(id) => Some(*id),
        }
    }

    /// The session user, but only once they have authenticated
    pub fn authenticated_user<'a>(&self, catalog: &'a Catalog) -> Option<&'a User> {
        self.user_id()
            .and_then(|id| catalog.user(id))
            .filter(|user| user.authenticated)
    }

    /// Hand the session to `id`, logging out whoever held it before
    pub fn switch_to(&mut self, id: UserId, catalog: &mut Catalog) {
        if self.user_id() != Some(id) {
            self.end(catalog);
        }
        *self = Session::LoggedIn(id);
    }

    /// Log the session user out and clear the session
    pub fn end(&mut self, catalog: &mut Catalog) {
        if let Some(user) = self.user_id().and_then(|id| catalog.user_mut(id)) {
            user.logout();
        }
        *self = Session::NoSession;
    }
}
