//! # Skrybe Client
//! Asynchronous wrapper around the Skrybe email-marketing HTTP API: send transactional email, create campaigns, and read or grow lists using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that send newsletters or transactional mail through a Skrybe account: configure with [`ClientBuilder`], describe the request with a typed options struct ([`SendEmailOptions`], [`CampaignOptions`], [`PageOptions`], [`Subscriber`]), and inspect the [`ApiResponse`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`; pass your own `reqwest::Client` through [`ClientBuilder::http_client`] to control timeouts and TLS.
//!
//! ## Request pipeline
//! Each call validates its input, maps the options onto the service's form fields, waits on the per-client throttle (100 ms between requests by default), then POSTs a form-encoded body carrying the API key.
//!
//! ## Out of scope
//! No retries, no pagination iteration, no typed response schemas. The service's replies are returned as-is in an [`ApiResponse`].
//!
//! ## Errors
//! Bad input becomes [`Error::Validation`] before anything is sent; transport failures and non-2xx statuses become [`Error::Transport`]; options that cannot be encoded become [`Error::Serialization`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use skrybe_client::{Client, SendEmailOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), skrybe_client::Error> {
//!     let client = Client::new("my-api-key")?;
//!
//!     let lists = client.get_lists(false).await?;
//!     println!("Lists: {lists:?}");
//!
//!     let options = SendEmailOptions {
//!         from_name: Some("Acme".into()),
//!         from_email: Some("news@acme.io".into()),
//!         subject: Some("Welcome".into()),
//!         html_text: Some("<p>Welcome aboard</p>".into()),
//!         to: Some("ann@example.com".into()),
//!         ..Default::default()
//!     };
//!     let response = client.send_email(&options).await?;
//!     println!("Status: {:?}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod payload;
mod throttle;
mod validate;

pub use client::{Client, ClientBuilder};
pub use error::{Error, FieldError, ValidationErrors};
pub use models::{ApiResponse, CampaignOptions, PageOptions, Recipients, SendEmailOptions, Subscriber};

/// Result type alias for Skrybe operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
