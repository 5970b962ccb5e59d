use anyhow::Context;
use campus_config::ClientConfig;
use campus_domain::{
    Applicant, Application, AuthToken, Billing, ChatRequest, ChatResponse, ChatService, Error,
    MarketplaceApi, NewPosting, Posting, UserProfile,
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const VERSION: &str = match option_env!("APP_VERSION") {
    None => env!("CARGO_PKG_VERSION"),
    Some(v) => v,
};

/// reqwest-backed client for the marketplace backend. Every call is a
/// single attempt; there is no retry.
#[derive(Clone)]
pub struct CampusHttpService {
    client: Client,
    base_url: Url,
    token: Option<AuthToken>,
}

impl CampusHttpService {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.http.connect_duration())
            .timeout(config.http.request_duration())
            .user_agent(format!("campus/{VERSION}"))
            .build()
            .context("Failed to build HTTP client")?;

        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url, token: None })
    }

    /// Token sent as `Authorization: Bearer` on authenticated calls.
    pub fn token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        if path.contains("://") || path.contains("..") {
            return Err(Error::InvalidPath(path.to_string()).into());
        }

        let path = path.trim_start_matches('/');
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to append {path} to base URL: {}", self.base_url))
    }

    fn headers(&self, authenticated: bool) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-app-version",
            HeaderValue::from_str(format!("v{VERSION}").as_str())
                .unwrap_or(HeaderValue::from_static("v0.1.0-dev")),
        );

        if authenticated {
            let token = self.token.as_ref().ok_or(Error::NotAuthenticated)?;
            let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .context("Token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!(headers = ?Self::sanitize_headers(&headers), "Request Headers");
        Ok(headers)
    }

    fn sanitize_headers(headers: &HeaderMap) -> HeaderMap {
        let sensitive_headers = [AUTHORIZATION.as_str()];
        headers
            .iter()
            .map(|(name, value)| {
                let name_str = name.as_str().to_lowercase();
                let value_str = if sensitive_headers.contains(&name_str.as_str()) {
                    HeaderValue::from_static("[REDACTED]")
                } else {
                    value.clone()
                };
                (name.clone(), value_str)
            })
            .collect()
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        authenticated: bool,
    ) -> anyhow::Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "Preparing request");
        Ok(self
            .client
            .request(method, url)
            .headers(self.headers(authenticated)?))
    }

    /// Sends and turns any non-2xx status into [`Error::Api`].
    async fn send(&self, request: RequestBuilder) -> anyhow::Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), %body, "Request failed");
        Err(Error::Api { status: status.as_u16(), body }.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self.send(self.request(Method::GET, path, true)?).await?;
        response
            .json()
            .await
            .with_context(|| format!("Invalid response body from {path}"))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, authenticated: bool) -> anyhow::Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, authenticated)?.json(body);
        let response = self.send(request).await?;
        response
            .json()
            .await
            .with_context(|| format!("Invalid response body from {path}"))
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait::async_trait]
impl ChatService for CampusHttpService {
    async fn chat(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        self.post_json("agent/chat", request, true).await
    }
}

#[async_trait::async_trait]
impl MarketplaceApi for CampusHttpService {
    async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthToken> {
        let request = self
            .request(Method::POST, "user/login", false)?
            .json(&LoginRequest { email, password });
        let body = self.send(request).await?.text().await?;
        Ok(AuthToken::new(body.trim()))
    }

    async fn me(&self) -> anyhow::Result<UserProfile> {
        self.get_json("user/me").await
    }

    async fn my_applications(&self) -> anyhow::Result<Vec<Application>> {
        self.get_json("posting/applications/me").await
    }

    async fn posting(&self, id: u64) -> anyhow::Result<Posting> {
        self.get_json(&format!("posting/{id}")).await
    }

    async fn posting_applicants(&self, posting_id: u64) -> anyhow::Result<Vec<Applicant>> {
        self.get_json(&format!("posting/{posting_id}/applications"))
            .await
    }

    async fn create_posting(&self, posting: &NewPosting) -> anyhow::Result<()> {
        let request = self.request(Method::POST, "posting", true)?.json(posting);
        self.send(request).await?;
        Ok(())
    }

    async fn update_application_status(
        &self,
        application_id: u64,
        approve: bool,
    ) -> anyhow::Result<()> {
        let status = if approve { "APPROVED" } else { "REJECTED" };
        let request = self
            .request(
                Method::PUT,
                &format!("posting/applications/{application_id}/status"),
                true,
            )?
            .query(&[("status", status)]);
        self.send(request).await?;
        Ok(())
    }

    async fn my_billings(&self) -> anyhow::Result<Vec<Billing>> {
        self.get_json("billing/my").await
    }

    async fn billing(&self, id: u64) -> anyhow::Result<Billing> {
        self.get_json(&format!("billing/{id}")).await
    }

    async fn students(&self) -> anyhow::Result<Vec<UserProfile>> {
        self.get_json("user/student/all").await
    }

    async fn decide_student_authorization(
        &self,
        user_id: u64,
        approve: bool,
    ) -> anyhow::Result<()> {
        let request = self
            .request(
                Method::PUT,
                &format!("user/student-authorization-request/{user_id}"),
                true,
            )?
            .query(&[("approve", approve)]);
        self.send(request).await?;
        Ok(())
    }
}
