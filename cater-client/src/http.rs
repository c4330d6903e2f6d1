//! HTTP client for the catering backend

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, multipart};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::error::{AppError, ErrorCode};
use shared::response::error_message;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

const LOGIN_PATH: &str = "auth/login";

/// HTTP client; clones share the bearer token
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// GET with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// POST with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    /// POST with form-encoded body
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).form(form)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }

    /// PUT with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// DELETE; whatever the backend replies with on success is discarded
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: IgnoredAny = self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Map non-success statuses to [`ClientError`]; empty bodies decode as `null`
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            let err = self.status_error(status, &text, &url);
            tracing::debug!(%url, status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    fn status_error(&self, status: StatusCode, body: &str, path: &str) -> ClientError {
        let message = error_message(status, body);
        match status {
            // Rejected credentials, not a rejected token
            StatusCode::UNAUTHORIZED if path.trim_end_matches('/').ends_with(LOGIN_PATH) => {
                AppError::with_message(ErrorCode::InvalidCredentials, message).into()
            }
            StatusCode::UNAUTHORIZED => {
                if self.is_authenticated() {
                    tracing::warn!("Token rejected by backend, signing out");
                }
                self.clear_token();
                ClientError::Unauthorized
            }
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
