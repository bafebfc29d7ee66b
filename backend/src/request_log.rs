use std::time::{Duration, Instant};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Data, Request, Response};
use tracing::info;

/// Arrival time of a request, kept in the request-local cache so every
/// fairing measures from the same instant.
#[derive(Clone, Copy)]
pub struct RequestTimer(Instant);

impl RequestTimer {
    pub fn start(req: &Request<'_>) -> Instant {
        req.local_cache(|| RequestTimer(Instant::now())).0
    }

    pub fn elapsed(req: &Request<'_>) -> Duration {
        Self::start(req).elapsed()
    }
}

/// One access-log line per response.
pub struct RequestLog;

#[rocket::async_trait]
impl Fairing for RequestLog {
    fn info(&self) -> Info {
        Info {
            name: "Request log",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        RequestTimer::start(req);
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let remote = req
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".into());

        info!(
            target: "access",
            remote = %remote,
            method = %req.method(),
            uri = %req.uri(),
            status = res.status().code,
            user_agent = req.headers().get_one("User-Agent").unwrap_or("-"),
            elapsed_ms = RequestTimer::elapsed(req).as_secs_f64() * 1000.0,
            "request"
        );
    }
}
