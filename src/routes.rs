use crate::{
    api::{attendance, register, report},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    middleware::Condition,
    web,
};
use serde_json::json;

type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter state for the POST routes. Built once in `main`; every
/// worker's `Governor` clones the same buckets.
#[derive(Clone)]
pub struct RateLimits {
    enabled: bool,
    register: LimiterConfig,
    attendance: LimiterConfig,
}

impl RateLimits {
    /// `requests_per_min == 0` disables limiting.
    pub fn new(requests_per_min: u32) -> Self {
        Self {
            enabled: requests_per_min > 0,
            register: build_limiter(requests_per_min),
            attendance: build_limiter(requests_per_min),
        }
    }
}

fn build_limiter(requests_per_min: u32) -> LimiterConfig {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limits: &RateLimits) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(config.json_limit_bytes)
            .error_handler(json_error),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error))
    .service(
        web::resource("/register")
            .wrap(Condition::new(limits.enabled, Governor::new(&limits.register)))
            .route(web::post().to(register::register_face)),
    )
    .service(
        web::resource("/attendance")
            .wrap(Condition::new(limits.enabled, Governor::new(&limits.attendance)))
            .route(web::post().to(attendance::mark_attendance)),
    )
    .service(web::resource("/report").route(web::get().to(report::daily_report)));
}

fn payload_error(
    err: impl std::fmt::Display + std::fmt::Debug + 'static,
    response: HttpResponse,
) -> actix_web::Error {
    InternalError::from_response(err, response).into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let mut response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge()
        }
        _ => HttpResponse::BadRequest(),
    };
    let body = response.json(json!({
        "message": err.to_string(),
        "code": "bad_request",
    }));
    payload_error(err, body)
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = HttpResponse::BadRequest().json(json!({
        "message": err.to_string(),
        "code": "bad_request",
    }));
    payload_error(err, body)
}
