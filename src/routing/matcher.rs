//! Route matching module
//!
//! Maps request paths onto the climate API routes.

/// Prefix shared by every data route
pub const API_PREFIX: &str = "/api/v1.0";

/// A matched API route with its decoded path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    Index,
    Precipitation,
    Stations,
    Tobs,
    StartSummary { start: String },
    RangeSummary { start: String, end: String },
}

/// Find the route for a request path
///
/// Static routes win over `{start}`; empty segments and anything past
/// `{start}/{end}` do not match.
pub fn match_route(path: &str) -> Option<ApiRoute> {
    if path == "/" {
        return Some(ApiRoute::Index);
    }

    let rest = path.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    match segments.as_slice() {
        ["precipitation"] => Some(ApiRoute::Precipitation),
        ["stations"] => Some(ApiRoute::Stations),
        ["tobs"] => Some(ApiRoute::Tobs),
        [start] => Some(ApiRoute::StartSummary {
            start: percent_decode(start),
        }),
        [start, end] => Some(ApiRoute::RangeSummary {
            start: percent_decode(start),
            end: percent_decode(end),
        }),
        _ => None,
    }
}

/// Decode `%XX` escapes; malformed escapes are kept as-is
fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(match_route("/"), Some(ApiRoute::Index));
        assert_eq!(
            match_route("/api/v1.0/precipitation"),
            Some(ApiRoute::Precipitation)
        );
        assert_eq!(match_route("/api/v1.0/stations"), Some(ApiRoute::Stations));
        assert_eq!(match_route("/api/v1.0/tobs"), Some(ApiRoute::Tobs));
    }

    #[test]
    fn test_start_and_range() {
        assert_eq!(
            match_route("/api/v1.0/2017-08-18"),
            Some(ApiRoute::StartSummary {
                start: "2017-08-18".to_string()
            })
        );
        assert_eq!(
            match_route("/api/v1.0/2017-08-18/2017-08-19"),
            Some(ApiRoute::RangeSummary {
                start: "2017-08-18".to_string(),
                end: "2017-08-19".to_string(),
            })
        );
    }

    #[test]
    fn test_static_name_as_range_start() {
        // Only the single-segment form is reserved
        assert_eq!(
            match_route("/api/v1.0/stations/2017-01-01"),
            Some(ApiRoute::RangeSummary {
                start: "stations".to_string(),
                end: "2017-01-01".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_dates_pass_through() {
        assert_eq!(
            match_route("/api/v1.0/yesterday"),
            Some(ApiRoute::StartSummary {
                start: "yesterday".to_string()
            })
        );
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            match_route("/api/v1.0/2017%2D08%2d18"),
            Some(ApiRoute::StartSummary {
                start: "2017-08-18".to_string()
            })
        );
        assert_eq!(percent_decode("a%20b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_route(""), None);
        assert_eq!(match_route("/api"), None);
        assert_eq!(match_route("/api/v1.0"), None);
        assert_eq!(match_route("/api/v1.0/"), None);
        assert_eq!(match_route("/api/v1.0//2017-01-01"), None);
        assert_eq!(match_route("/api/v1.0/precipitation/"), None);
        assert_eq!(match_route("/api/v1.0/a/b/c"), None);
        assert_eq!(match_route("/api/v2.0/stations"), None);
        assert_eq!(match_route("/api/v1.0stations"), None);
    }
}
