//! HTTP client for the Bankly REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests: token issuance, registration, accounts, transactions, and
//! notifications.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::auth::Credential;
use crate::models::{Account, AccountType, Notification, Statement, TransactionRequest};

use super::{ApiError, FormOutcome};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response payload of `POST /api/authentication/register/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response payload of `POST /api/accounts/create/`.
/// The create endpoint serializes only id and type; balance comes from a
/// subsequent list fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAccount {
    pub id: i64,
    pub account_type: AccountType,
}

/// API client for the Bankly service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given server base URL.
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    // =========================================================================
    // Authentication endpoints
    // =========================================================================

    /// Exchange username/password for a token pair.
    pub async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<FormOutcome<Credential>> {
        let url = format!("{}/api/authentication/token/", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .context("Failed to send login request")?;

        FormOutcome::from_response(response).await
    }

    /// Register a new user account.
    pub async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<FormOutcome<RegisteredUser>> {
        let url = format!("{}/api/authentication/register/", self.base_url);

        let mut body = json!({ "username": username, "password": password });
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            body["email"] = json!(email);
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send registration request")?;

        FormOutcome::from_response(response).await
    }

    // =========================================================================
    // Account endpoints
    // =========================================================================

    /// Fetch the authenticated user's accounts.
    pub async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        let url = format!("{}/api/accounts/", self.base_url);
        self.get(&url).await
    }

    /// Create a new bank account of the given type.
    pub async fn create_account(
        &self,
        account_type: AccountType,
    ) -> Result<FormOutcome<CreatedAccount>> {
        let url = format!("{}/api/accounts/create/", self.base_url);
        self.post_form(&url, &json!({ "account_type": account_type.as_str() }))
            .await
    }

    /// Fetch the statement list for one account.
    pub async fn fetch_statements(&self, account_id: i64) -> Result<Vec<Statement>> {
        let url = format!("{}/api/accounts/{}/statements/", self.base_url, account_id);
        self.get(&url).await
    }

    /// Submit a transaction from the given sender account.
    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<FormOutcome<Statement>> {
        let url = format!("{}/api/accounts/transactions/create/", self.base_url);
        self.post_form(&url, request).await
    }

    /// Fetch unread notifications for the authenticated user.
    pub async fn fetch_unread_notifications(&self) -> Result<Vec<Notification>> {
        let url = format!("{}/api/accounts/notifications/unread/", self.base_url);
        self.get(&url).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    /// POST a JSON form body, classifying the response into a `FormOutcome`.
    async fn post_form<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<FormOutcome<T>> {
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        FormOutcome::from_response(response).await
    }
}
