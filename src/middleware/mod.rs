//! HTTP middleware and request extractors

pub mod client_ip;
pub mod cors;
pub mod logging;

pub use client_ip::ClientIp;
pub use cors::cors_middleware;
pub use logging::logging_middleware;
