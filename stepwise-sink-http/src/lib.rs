//! # stepwise-sink-http
//!
//! A `ResponseSink` that posts each submission to an HTTP endpoint as a flat
//! JSON object, once, with a request timeout.
//!
//! By default the reply is not read: any request that completes counts as
//! delivered, the way a browser treats an opaque cross-origin response. Set
//! `ResponseMode::Inspect` to also fail on non-2xx statuses and on a
//! `{"result": "error", "error": "..."}` body.
//!
//! ```rust,ignore
//! use stepwise_sink_http::{HttpSink, HttpSinkConfig};
//!
//! let sink = HttpSink::new(&HttpSinkConfig::load("sink.toml")?)?;
//! wizard.submit(&sink).await?;
//! ```

mod config;
pub use config::{ConfigError, HttpSinkConfig, ResponseMode};

mod sink;
pub use sink::{HttpSink, HttpSinkError};
