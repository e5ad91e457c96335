//! A minimal client-side HTTP request layer.
//!
//! The crate turns `(url, method, parameters, headers)` into a prepared
//! request, dispatches it over an injectable [`Transport`], classifies the
//! outcome into a closed [`NetworkError`] taxonomy, and decodes successful
//! bodies into typed values.
//!
//! ## Modules
//!
//! - [`status`] - Status code → [`NetworkError`] classification
//! - [`encoder`] - The [`ParameterEncoder`] trait and its JSON implementation
//! - [`builder`] - Request assembly
//! - [`response`] - [`NetworkResponse`], [`RawResponse`], and the handlers
//! - [`transport`] - The [`Transport`] seam and [`ReqwestTransport`]
//! - [`manager`] - [`RequestManager`], which ties everything together
//!
//! ## Examples
//!
//! ```rust,ignore
//! use networker::{HttpMethod, NetworkResponse, ParamValue, Parameters, RequestManager};
//! use url::Url;
//!
//! #[derive(serde::Deserialize)]
//! struct Page { items: Vec<String> }
//!
//! let manager = RequestManager::new()?;
//! let url = Url::parse("https://api.example.com/items")?;
//! let parameters = Parameters::from([("page".to_string(), ParamValue::from(2))]);
//!
//! match manager.fetch::<Page>(&url, HttpMethod::Post, Some(&parameters), None).await {
//!     NetworkResponse::Success(page) => println!("{} items", page.items.len()),
//!     NetworkResponse::Failure(e) => eprintln!("request failed: {e}"),
//! }
//! ```

pub mod builder;
pub mod encoder;
pub mod error;
pub mod manager;
pub mod method;
pub mod params;
pub mod queue;
pub mod request;
pub mod response;
pub mod status;
pub mod transport;

pub use builder::build_request;
pub use encoder::{JsonParameterEncoder, ParameterEncoder};
pub use error::{ConfigError, EncodingError, NetworkError, TransportError};
pub use manager::{RequestManager, RequestManagerBuilder, Requestable};
pub use method::HttpMethod;
pub use params::{Headers, ParamValue, Parameters};
pub use queue::CompletionQueue;
pub use request::{CachePolicy, HttpRequest, RequestConfig, DEFAULT_TIMEOUT};
pub use response::{handle_raw_response, handle_response, HttpResponse, NetworkResponse, RawResponse};
pub use status::classify;
pub use transport::{BoxFuture, DataTask, ReqwestTransport, Transport, TransportOutput};
