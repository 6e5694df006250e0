//! Access log line formats
//!
//! - `combined`: CLF plus referer and user agent
//! - `common`: Common Log Format
//! - `json`: one object per line
//! - anything else is a pattern with `$variables`

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use chrono::{DateTime, Local};
use hyper::body::Body;
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Request, Response, Version};

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// What gets logged about one request/response exchange
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: IpAddr,
    /// When the request arrived
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub http_version: &'static str,
    pub status: u16,
    /// Body bytes sent; 0 for HEAD
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub elapsed: Duration,
}

impl AccessLogEntry {
    /// Capture the request line and headers; status is filled in later
    pub fn from_request<B>(req: &Request<B>, peer_addr: SocketAddr) -> Self {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        Self {
            remote_addr: peer_addr.ip(),
            time: Local::now(),
            method: req.method().to_string(),
            path: req.uri().path().to_owned(),
            query: req.uri().query().map(str::to_owned),
            http_version: match req.version() {
                Version::HTTP_10 => "1.0",
                Version::HTTP_2 => "2",
                _ => "1.1",
            },
            status: 0,
            body_bytes: 0,
            referer: header(REFERER),
            user_agent: header(USER_AGENT),
            elapsed: Duration::ZERO,
        }
    }

    pub fn record_response<B: Body>(&mut self, response: &Response<B>, elapsed: Duration) {
        self.status = response.status().as_u16();
        self.body_bytes = response.body().size_hint().exact().unwrap_or_default();
        self.elapsed = elapsed;
    }

    /// Render as `combined`, `common`, `json` or a custom `$variable` pattern
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.common_line(),
                dash(self.referer.as_deref()),
                dash(self.user_agent.as_deref()),
            ),
            "common" => self.common_line(),
            "json" => self.json_line(),
            pattern => self.substitute(pattern),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.request_uri(), self.http_version)
    }

    fn common_line(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn json_line(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr.to_string(),
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX),
        })
        .to_string()
    }

    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$request_time`
    /// (seconds, 3 decimals), `$status`, `$body_bytes_sent`,
    /// `$http_referer`, `$http_user_agent`.
    fn substitute(&self, pattern: &str) -> String {
        // Longer names sharing a prefix go first: $request_* before $request
        let variables = [
            ("$remote_addr", self.remote_addr.to_string()),
            ("$time_local", self.time.format(CLF_TIME).to_string()),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_time", format!("{:.3}", self.elapsed.as_secs_f64())),
            ("$request_method", self.method.clone()),
            ("$request_uri", self.request_uri()),
            ("$request", self.request_line()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            ("$http_referer", dash(self.referer.as_deref()).to_owned()),
            ("$http_user_agent", dash(self.user_agent.as_deref()).to_owned()),
        ];

        variables
            .iter()
            .fold(pattern.to_owned(), |line, (name, value)| line.replace(name, value))
    }
}

fn dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
