//! Shared plumbing for the downstream REST clients.

use reqwest::{Client, Response, Url};
use tracing::{error, warn};

use common::{AppError, AppResult, DownstreamService, HttpClientConfig};

/// Build a client with the configured connect and request timeouts.
pub(crate) fn build_client(config: &HttpClientConfig) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
}

/// Parse a peer's base URL; it must be able to carry path segments.
pub(crate) fn parse_base_url(service: DownstreamService, raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::internal(format!("Invalid {} service URL {}: {}", service, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(AppError::internal(format!(
            "Invalid {} service URL {}: not a base URL",
            service, raw
        )));
    }
    Ok(url)
}

/// Append path segments to the base URL. Each segment is percent-encoded
/// on its own, so ids containing `/`, `?` or `#` stay a single segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // parse_base_url rejects URLs without a hierarchical path
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Map a transport failure (refused, timed out, ...) to a downstream error.
pub(crate) fn transport_error(service: DownstreamService, err: reqwest::Error) -> AppError {
    error!(%service, error = %err, "Downstream request failed");
    AppError::Downstream {
        service,
        status: None,
        body: Some(err.to_string()),
    }
}

/// Pass 2xx responses through; turn anything else into a downstream error
/// carrying the remote status and body.
pub(crate) async fn check_status(
    service: DownstreamService,
    response: Response,
) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(%service, status = status.as_u16(), error = %e, "Could not read downstream error body");
            format!("unreadable response body: {}", e)
        }
    };
    error!(%service, status = status.as_u16(), body = %body, "Downstream service rejected request");
    Err(AppError::downstream(service, Some(status.as_u16()), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        parse_base_url(DownstreamService::Payment, raw).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let url = endpoint(
            &base("http://payment:8085/"),
            &["api", "v1", "payment", "delete", "student", "sid-1"],
        );
        assert_eq!(url.as_str(), "http://payment:8085/api/v1/payment/delete/student/sid-1");

        assert_eq!(endpoint(&base("http://auth"), &["x"]).as_str(), "http://auth/x");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let url = endpoint(&base("http://gateway/tuition-svc/"), &["api", "v1"]);
        assert_eq!(url.path(), "/tuition-svc/api/v1");
    }

    #[test]
    fn test_endpoint_encodes_each_segment() {
        let url = endpoint(&base("http://tuition"), &["tuition", "a?b/c#d"]);

        assert_eq!(url.path(), "/tuition/a%3Fb%2Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(parse_base_url(DownstreamService::Auth, "not a url").is_err());
        assert!(parse_base_url(DownstreamService::Auth, "mailto:ops@example.org").is_err());
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&HttpClientConfig::default()).is_ok());
    }
}
