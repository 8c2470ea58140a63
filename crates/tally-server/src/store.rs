use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use http::StatusCode;
use serde::{Deserialize, Serialize};
use tally_core::Failure;

/// A registered user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub age: Option<i64>,
}

/// In-process user registry
///
/// Stands in for the external storage layer and reports failures with the
/// engine's taxonomy, so the boundary sees the same shapes production
/// storage produces.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserStore {
    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns a storage failure with the unique-violation engine code when
    /// the email is already registered
    pub fn insert(&self, user: User) -> Result<(), Failure> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);

        if users.contains_key(&user.email) {
            return Err(Failure::unique_violation("email already taken"));
        }

        users.insert(user.email.clone(), user);
        Ok(())
    }

    /// Look up a user by email
    ///
    /// # Errors
    ///
    /// Returns a failure encoding 404 when no user matches
    pub fn find(&self, email: &str) -> Result<User, Failure> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
            .ok_or_else(|| Failure::with_status(format!("no user registered for {email}"), StatusCode::NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::UNIQUE_VIOLATION;

    fn user(email: &str) -> User {
        User {
            email: email.to_owned(),
            age: None,
        }
    }

    #[test]
    fn insert_then_find_round_trips() {
        let store = UserStore::default();
        store.insert(user("a@example.com")).unwrap();
        assert_eq!(store.find("a@example.com").unwrap().email, "a@example.com");
    }

    #[test]
    fn duplicate_email_reports_the_engine_code() {
        let store = UserStore::default();
        store.insert(user("a@example.com")).unwrap();

        let failure = store.insert(user("a@example.com")).unwrap_err();
        let origin = failure.origin().expect("storage failure carries an origin");
        assert_eq!(origin.code.as_deref(), Some(UNIQUE_VIOLATION));
        assert_eq!(origin.detail.as_deref(), Some("email already taken"));
    }

    #[test]
    fn missing_user_encodes_not_found() {
        let store = UserStore::default();
        let failure = store.find("nobody@example.com").unwrap_err();
        assert_eq!(failure.encoded_status(), Some(StatusCode::NOT_FOUND));
    }
}
