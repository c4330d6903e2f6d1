//! Sign-in flow tying the HTTP token to the application session

use crate::{ClientResult, HttpClient};
use cater_core::AppState;
use shared::client::UserInfo;

/// Log in, load the profile and record both in `state`
pub async fn sign_in(
    client: &HttpClient,
    state: &mut AppState,
    username: &str,
    password: &str,
) -> ClientResult<UserInfo> {
    let login = client.login(username, password).await?;
    let user = track_session(state, client.me().await)?;
    state.sign_in(login.access_token, Some(user.clone()));
    Ok(user)
}

pub fn sign_out(client: &HttpClient, state: &mut AppState) {
    client.logout();
    state.sign_out();
}

/// Mirror a rejected token into the application session
pub fn track_session<T>(state: &mut AppState, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result
        && e.is_unauthorized()
    {
        state.sign_out();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, ClientError};
    use cater_core::Cart;

    #[tokio::test]
    async fn test_unauthorized_signs_out() {
        let mut state = AppState::new(Cart::in_memory());
        state.sign_in("tok", None);

        let ok: ClientResult<u8> = Ok(1);
        assert!(track_session(&mut state, ok).is_ok());
        assert!(state.is_authenticated());

        let rejected: ClientResult<u8> = Err(ClientError::Unauthorized);
        assert!(track_session(&mut state, rejected).is_err());
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_out_clears_both_sides() {
        let client = ClientConfig::default().with_token("tok").build_http_client().unwrap();
        let mut state = AppState::new(Cart::in_memory());
        state.sign_in("tok", None);

        sign_out(&client, &mut state);
        assert!(client.token().is_none());
        assert!(!state.is_authenticated());
    }
}
