//! msgboard/crates/mb-api/src/middleware.rs Middleware
//!
//! Custom middleware for security and logging.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the access logger used by the msgboard API.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing)
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}

// Only frame the site from itself, no DNS prefetching, same-origin referrers.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("Referrer-Policy", "same-origin"))
}
