//! Application state handle
//!
//! Owns the cart and the authenticated session. Front ends keep one
//! `AppState` and pass it by `&mut` to whatever needs it.

use crate::cart::Cart;
use shared::client::UserInfo;
use shared::error::{AppError, AppResult, ErrorCode};
use tracing::info;

/// Bearer token and the user it belongs to, held in memory only
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserInfo>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug)]
pub struct AppState {
    cart: Cart,
    session: Session,
}

impl AppState {
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            session: Session::default(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn sign_in(&mut self, token: impl Into<String>, user: Option<UserInfo>) {
        if let Some(user) = &user {
            info!(user_id = user.id, "Signed in");
        }
        self.session = Session {
            token: Some(token.into()),
            user,
        };
    }

    pub fn set_user(&mut self, user: UserInfo) {
        self.session.user = Some(user);
    }

    /// Drop the session; the cart is kept
    pub fn sign_out(&mut self) {
        if self.session.is_authenticated() {
            info!("Signed out");
        }
        self.session = Session::default();
    }

    /// Signed-in caterer or admin
    pub fn require_manager(&self) -> AppResult<&UserInfo> {
        let user = self
            .session
            .user()
            .filter(|_| self.session.is_authenticated())
            .ok_or_else(AppError::not_authenticated)?;
        if !user.can_manage() {
            return Err(AppError::new(ErrorCode::PermissionDenied));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::client::UserRole;

    fn user(role: UserRole) -> UserInfo {
        UserInfo {
            id: 1,
            email: "chef@example.com".to_string(),
            full_name: None,
            role,
            is_active: true,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut state = AppState::new(Cart::in_memory());
        assert!(!state.is_authenticated());

        state.sign_in("tok", Some(user(UserRole::Customer)));
        assert_eq!(state.session().token(), Some("tok"));

        state.sign_out();
        assert!(!state.is_authenticated());
        assert!(state.session().user().is_none());
    }

    #[test]
    fn test_require_manager() {
        let mut state = AppState::new(Cart::in_memory());
        assert_eq!(
            state.require_manager().unwrap_err().code,
            ErrorCode::NotAuthenticated
        );

        state.sign_in("tok", Some(user(UserRole::Customer)));
        assert_eq!(
            state.require_manager().unwrap_err().code,
            ErrorCode::PermissionDenied
        );

        state.set_user(user(UserRole::Caterer));
        assert!(state.require_manager().is_ok());
    }
}
