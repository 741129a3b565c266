//! Skrybe async client implementation.

use crate::models::{ApiResponse, CampaignOptions, PageOptions, SendEmailOptions, Subscriber};
use crate::payload::{self, FormPayload};
use crate::throttle::Throttle;
use crate::{Error, Result, validate};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://dashboard.skry.be";
const USER_AGENT_VALUE: &str = concat!("skrybe-client-rust/", env!("CARGO_PKG_VERSION"));
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

const SEND_EMAIL_PATH: &str = "/api/emails/send.php";
const CREATE_CAMPAIGN_PATH: &str = "/api/campaigns/create.php";
const GET_LISTS_PATH: &str = "/api/lists/get-lists.php";
const GET_CAMPAIGNS_PATH: &str = "/api/campaigns/get-campaigns.php";
const GET_SUBSCRIBERS_PATH: &str = "/api/subscribers/get-subscribers.php";
const ADD_SUBSCRIBER_PATH: &str = "/api/subscribers/add.php";

/// API key that never shows up in `Debug` output.
#[derive(Clone)]
struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Async client for the Skrybe email-marketing API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] to change the
/// endpoint, user agent, throttle interval, or HTTP client.
///
/// Requests issued through one client are spaced at least
/// [`ClientBuilder::min_request_interval`] apart, including across tasks
/// sharing the client behind an `Arc`.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    user_agent: HeaderValue,
    throttle: Throttle,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client with the default endpoint and settings.
    ///
    /// # Errors
    /// [`Error::Config`] if `api_key` is blank.
    ///
    /// # Examples
    /// ```no_run
    /// # use skrybe_client::Client;
    /// let client = Client::new("my-api-key")?;
    /// # Ok::<(), skrybe_client::Error>(())
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Minimum spacing enforced between requests.
    pub fn min_request_interval(&self) -> Duration {
        self.throttle.min_interval()
    }

    /// Send a transactional email.
    ///
    /// # Errors
    /// [`Error::Validation`] when required fields are missing or an address
    /// is malformed; nothing is sent in that case.
    ///
    /// # Examples
    /// ```no_run
    /// # use skrybe_client::{Client, SendEmailOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), skrybe_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let options = SendEmailOptions {
    ///     from_name: Some("Acme".into()),
    ///     from_email: Some("news@acme.io".into()),
    ///     subject: Some("Welcome".into()),
    ///     html_text: Some("<p>Welcome aboard</p>".into()),
    ///     to: Some(vec!["ann@example.com"].into()),
    ///     ..Default::default()
    /// };
    /// let response = client.send_email(&options).await?;
    /// println!("{:?}", response.status());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(&self, options: &SendEmailOptions) -> Result<ApiResponse> {
        validate::send_email(options)?;
        let form = payload::send_email(options)?;
        self.post(SEND_EMAIL_PATH, form).await
    }

    /// Create (and optionally send or schedule) a campaign.
    ///
    /// # Errors
    /// [`Error::Validation`] when required fields are missing or
    /// `from_email` is absent or malformed.
    pub async fn create_campaign(&self, options: &CampaignOptions) -> Result<ApiResponse> {
        validate::create_campaign(options)?;
        let form = payload::create_campaign(options)?;
        self.post(CREATE_CAMPAIGN_PATH, form).await
    }

    /// Fetch the account's lists, optionally including hidden ones.
    pub async fn get_lists(&self, include_hidden: bool) -> Result<ApiResponse> {
        self.post(GET_LISTS_PATH, payload::get_lists(include_hidden))
            .await
    }

    /// Fetch one page of campaigns.
    ///
    /// # Examples
    /// ```no_run
    /// # use skrybe_client::{Client, PageOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), skrybe_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let first = client.get_campaigns(None).await?;
    /// let sent = client
    ///     .get_campaigns(Some(&PageOptions::default().page(2).status("sent")))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_campaigns(&self, options: Option<&PageOptions>) -> Result<ApiResponse> {
        self.post(GET_CAMPAIGNS_PATH, payload::get_campaigns(options))
            .await
    }

    /// Fetch one page of a list's subscribers.
    pub async fn get_subscribers(
        &self,
        list_id: &str,
        options: Option<&PageOptions>,
    ) -> Result<ApiResponse> {
        self.post(
            GET_SUBSCRIBERS_PATH,
            payload::get_subscribers(list_id, options),
        )
        .await
    }

    /// Add a subscriber to a list.
    ///
    /// The subscriber is not validated locally; the service decides.
    pub async fn add_subscriber(&self, list_id: &str, subscriber: &Subscriber) -> Result<ApiResponse> {
        let form = payload::add_subscriber(list_id, subscriber)?;
        self.post(ADD_SUBSCRIBER_PATH, form).await
    }

    /// Common POST request pattern.
    async fn post(&self, path: &str, form: FormPayload) -> Result<ApiResponse> {
        let form = form.with_api_key(&self.api_key.0);
        let url = format!("{}{}", self.base_url, path);

        self.throttle.wait().await;
        tracing::debug!(path, fields = form.len(), "sending request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers())
            .form(form.as_pairs())
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        let body = response.text().await?;
        let result = ApiResponse::from_body(body);
        tracing::debug!(
            path,
            status = status.as_u16(),
            kind = result.kind(),
            "received response"
        );
        Ok(result)
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers
    }
}

/// Builder for configuring a Skrybe client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: ApiKey,
    base_url: String,
    user_agent: String,
    min_request_interval: Duration,
    http: Option<reqwest::Client>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Base URL `https://dashboard.skry.be`
    /// - `skrybe-client-rust/<version>` user agent
    /// - 100 ms minimum interval between requests
    /// - A fresh `reqwest::Client` with certificate validation on
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            min_request_interval: MIN_REQUEST_INTERVAL,
            http: None,
            proxy: None,
            danger_accept_invalid_certs: false,
        }
    }

    /// Override the service endpoint, e.g. for a self-hosted install or a
    /// test server. A trailing slash is ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Minimum time between the starts of consecutive requests.
    ///
    /// `Duration::ZERO` disables throttling.
    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, TLS, pooling).
    ///
    /// When set, [`proxy`](Self::proxy) and
    /// [`danger_accept_invalid_certs`](Self::danger_accept_invalid_certs) are
    /// ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// [`Error::Config`] for a blank API key, a user agent that is not a
    /// valid header value, an invalid proxy URL, or when the HTTP client
    /// cannot be created.
    ///
    /// # Examples
    /// ```no_run
    /// # use skrybe_client::Client;
    /// # use std::time::Duration;
    /// let client = Client::builder("my-api-key")
    ///     .user_agent("my-app/1.0")
    ///     .min_request_interval(Duration::from_millis(250))
    ///     .build()?;
    /// # Ok::<(), skrybe_client::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        if self.api_key.0.trim().is_empty() {
            return Err(Error::Config("api key must not be empty".into()));
        }
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| Error::Config(format!("invalid user agent: {e}")))?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .danger_accept_invalid_certs(self.danger_accept_invalid_certs);
                if let Some(proxy_url) = &self.proxy {
                    let proxy = reqwest::Proxy::all(proxy_url)
                        .map_err(|e| Error::Config(format!("invalid proxy {proxy_url}: {e}")))?;
                    builder = builder.proxy(proxy);
                }
                builder
                    .build()
                    .map_err(|e| Error::Config(format!("http client: {e}")))?
            }
        };

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            user_agent,
            throttle: Throttle::new(self.min_request_interval),
        })
    }
}
