//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The client
//! core builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the core deterministic and easy to
//! test: every operation in the controller is a `begin_*` that yields a
//! request and a `finish` that consumes the round-trip outcome.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross any
//! binding boundary without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoApi::build_*` methods and handed out by
/// `TodoListClient::begin_*`. The caller is responsible for executing this
/// request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// back via `TodoListClient::finish` or `TodoApi::parse_*`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The host failed to execute an `HttpRequest` at all (connection refused,
/// DNS failure, timeout in the underlying agent). Reported to
/// `TodoListClient::finish` so a dead transport is recovered exactly like a
/// failed response.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);
