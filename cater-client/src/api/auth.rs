//! Auth API

use crate::{ClientResult, HttpClient};
use shared::client::{HealthStatus, LoginRequest, LoginResponse, UserInfo};

impl HttpClient {
    /// Connectivity probe
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("health").await
    }

    /// Form-encoded login; the returned token is used for later requests
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_form("auth/login", &request).await?;
        self.set_token(response.access_token.clone());
        tracing::info!(username, "Logged in");
        Ok(response)
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("users/me").await
    }

    /// Forget the token; the backend keeps no session to close
    pub fn logout(&self) {
        self.clear_token();
    }
}
