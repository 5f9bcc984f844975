//! HTTP response handlers.

use crate::asset::{Asset, Headers, SecurityHeaders};
use crate::utils::mime::types::PLAIN;
use anyhow::{Result, anyhow};
use std::io;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Methods the server answers; everything else gets 405.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Respond with a routed asset. `HEAD` gets the same status and headers
/// without the body.
pub fn respond_asset(request: Request, asset: Asset) -> Result<()> {
    let headers = to_tiny_headers(&asset.headers)?;

    if is_head_request(&request) {
        let response = Response::new(
            StatusCode(asset.status),
            headers,
            io::empty(),
            Some(asset.body.len()),
            None,
        );
        request.respond(response)?;
        return Ok(());
    }

    let length = asset.body.len();
    let response = Response::new(
        StatusCode(asset.status),
        headers,
        io::Cursor::new(asset.body),
        Some(length),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request, security: &SecurityHeaders) -> Result<()> {
    let mut headers = Headers::new()
        .with("Content-Type", PLAIN)
        .with("Allow", ALLOWED_METHODS);
    security.apply(&mut headers);
    send_plain(request, 405, headers, b"405 Method Not Allowed")
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request, security: &SecurityHeaders) -> Result<()> {
    let mut headers = Headers::new().with("Content-Type", PLAIN);
    security.apply(&mut headers);
    send_plain(request, 503, headers, b"503 Service Unavailable")
}

pub fn is_allowed_method(method: &Method) -> bool {
    matches!(method, Method::Get | Method::Head)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_plain(request: Request, status: u16, headers: Headers, body: &[u8]) -> Result<()> {
    let response = Response::new(
        StatusCode(status),
        to_tiny_headers(&headers)?,
        body,
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Convert to `tiny_http` headers, rejecting values it cannot encode.
fn to_tiny_headers(headers: &Headers) -> Result<Vec<Header>> {
    headers
        .iter()
        .map(|(name, value)| {
            Header::from_bytes(name, value).map_err(|()| anyhow!("invalid header `{name}`"))
        })
        .collect()
}
