//! Client address extraction

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

use crate::{constants::UNKNOWN_CLIENT_IP, state::AppState};

/// Address of the client that sent the request.
///
/// Resolved from the configured forwarding header, then the TCP peer,
/// then the literal `"unknown"`. Never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_name = state.config().http.client_ip_header.as_str();

        // X-Forwarded-For style lists carry the original client first
        let forwarded = parts
            .headers
            .get(header_name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| UNKNOWN_CLIENT_IP.to_string());

        Ok(Self(ip))
    }
}
