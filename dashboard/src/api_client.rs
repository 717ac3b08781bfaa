use std::time::Duration;

use async_trait::async_trait;
use fx_domain::api::{
    ConsolidatedRate, UpdateRateRequest, CONSOLIDATED_RATE_PATH, FOREX_RATES_PATH,
    UPDATE_RATE_PATH,
};
use fx_domain::currency::CurrencyCode;
use fx_domain::rates::RateSource;
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request, StatusCode, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
#[cfg(test)]
use mockall::automock;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

pub type HttpParams = Vec<(String, String)>;

const APPLICATION_JSON: &str = "application/json";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unable to create url from {url}: {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    #[error("Unable to build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("Unable to send request: {0}")]
    Transport(#[from] hyper::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error! status: {status}, content: {content}")]
    Status { status: StatusCode, content: String },

    #[error("Unable to serialize request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Unable to parse response '{content}': {source}")]
    Decode {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Remote side of the dashboard: the forex rates book and the consolidated rate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RatesApi: Send + Sync {
    async fn forex_rates(&self) -> Result<Vec<RateSource>, ApiError>;

    /// Response body is not used, only the status matters
    async fn update_rate(&self, request: UpdateRateRequest) -> Result<(), ApiError>;

    async fn consolidated_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConsolidatedRate, ApiError>;
}

#[derive(Debug)]
pub struct RestRequestOutcome {
    pub status: StatusCode,
    pub content: String,
}

pub struct HttpRatesApi {
    client: Client<HttpsConnector<HttpConnector>>,
    base_url: String,
    timeout: Duration,
}

impl HttpRatesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: create_client(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    async fn send(
        &self,
        request: Request<Body>,
        action_name: &'static str,
    ) -> Result<RestRequestOutcome, ApiError> {
        let request_id = Uuid::new_v4();
        log::trace!(
            "{action_name} request {} {}, request_id: {request_id}",
            request.method(),
            request.uri()
        );

        let outcome = tokio::time::timeout(self.timeout, self.execute(request))
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))??;

        log::trace!("{action_name} response: {outcome:?}, request_id: {request_id}");

        if !outcome.status.is_success() {
            return Err(ApiError::Status {
                status: outcome.status,
                content: outcome.content,
            });
        }

        Ok(outcome)
    }

    async fn execute(&self, request: Request<Body>) -> Result<RestRequestOutcome, ApiError> {
        let response = self.client.request(request).await?;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        Ok(RestRequestOutcome { status, content })
    }
}

#[async_trait]
impl RatesApi for HttpRatesApi {
    async fn forex_rates(&self) -> Result<Vec<RateSource>, ApiError> {
        let uri = build_uri(&self.base_url, FOREX_RATES_PATH, &HttpParams::new())?;
        let request = json_request(Method::GET, uri, Body::empty())?;

        let outcome = self.send(request, "forex_rates").await?;
        parse_content(outcome)
    }

    async fn update_rate(&self, request: UpdateRateRequest) -> Result<(), ApiError> {
        let uri = build_uri(&self.base_url, UPDATE_RATE_PATH, &HttpParams::new())?;
        let body = serde_json::to_string(&request).map_err(ApiError::Encode)?;
        let request = json_request(Method::POST, uri, Body::from(body))?;

        let _ = self.send(request, "update_rate").await?;
        Ok(())
    }

    async fn consolidated_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConsolidatedRate, ApiError> {
        let http_params = vec![
            ("from".to_owned(), from.to_string()),
            ("to".to_owned(), to.to_string()),
        ];
        let uri = build_uri(&self.base_url, CONSOLIDATED_RATE_PATH, &http_params)?;
        let request = json_request(Method::GET, uri, Body::empty())?;

        let outcome = self.send(request, "consolidated_rate").await?;
        parse_content(outcome)
    }
}

fn json_request(method: Method, uri: Uri, body: Body) -> Result<Request<Body>, ApiError> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(ACCEPT, APPLICATION_JSON)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body)?)
}

fn parse_content<T: DeserializeOwned>(outcome: RestRequestOutcome) -> Result<T, ApiError> {
    match serde_json::from_str(&outcome.content) {
        Ok(value) => Ok(value),
        Err(source) => Err(ApiError::Decode {
            content: outcome.content,
            source,
        }),
    }
}

fn create_client() -> Client<HttpsConnector<HttpConnector>> {
    let https = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder().build::<_, Body>(https)
}

/// Query values are percent-encoded, currency codes come straight from user input
pub fn build_uri(host: &str, path: &str, http_params: &HttpParams) -> Result<Uri, ApiError> {
    let mut url = String::with_capacity(host.len() + path.len() + 64);
    url.push_str(host);
    url.push_str(path);

    if !http_params.is_empty() {
        url.push('?');
        url.push_str(&to_http_string(http_params));
    }

    url.parse()
        .map_err(|source| ApiError::InvalidUri { url, source })
}

pub fn to_http_string(parameters: &HttpParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(parameters)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Response, Server};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::sync::Arc;

    type SeenRequests = Arc<Mutex<Vec<String>>>;

    /// Local server answering every request with `status` and `body` after `delay`,
    /// recording "METHOD URI BODY" of each request
    fn serve(status: StatusCode, body: &'static str, delay: Duration) -> (SocketAddr, SeenRequests) {
        let seen = SeenRequests::default();
        let seen_by_server = seen.clone();

        let make_service = make_service_fn(move |_| {
            let seen = seen_by_server.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let seen = seen.clone();
                    async move {
                        let method = request.method().clone();
                        let uri = request.uri().clone();
                        let bytes = hyper::body::to_bytes(request.into_body())
                            .await
                            .unwrap_or_default();
                        seen.lock().push(format!(
                            "{method} {uri} {}",
                            String::from_utf8_lossy(&bytes)
                        ));

                        tokio::time::sleep(delay).await;
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .body(Body::from(body))
                                .expect("in test"),
                        )
                    }
                }))
            }
        });

        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_service);
        let address = server.local_addr();
        let _ = tokio::spawn(server);

        (address, seen)
    }

    fn api(address: SocketAddr) -> HttpRatesApi {
        HttpRatesApi::new(&format!("http://{address}/"), Duration::from_secs(5))
    }

    #[test]
    fn full_uri() {
        let params: HttpParams = vec![("from", "USD"), ("to", "AED")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        let uri = build_uri("http://localhost:3000", CONSOLIDATED_RATE_PATH, &params)
            .expect("in test");

        let expected: Uri = "http://localhost:3000/api/consolidated-rate?from=USD&to=AED"
            .parse()
            .expect("in test");
        assert_eq!(uri, expected)
    }

    #[test]
    fn uri_params_are_encoded() {
        let params: HttpParams = vec![("from".to_owned(), "US D&x=1".to_owned())];

        let uri = build_uri("http://localhost:3000", "/path", &params).expect("in test");

        assert_eq!(uri.query(), Some("from=US+D%26x%3D1"));
    }

    #[test]
    fn uri_without_params() {
        let uri = build_uri("http://localhost:3000", FOREX_RATES_PATH, &HttpParams::new())
            .expect("in test");

        assert_eq!(uri.path(), FOREX_RATES_PATH);
        assert_eq!(uri.query(), None);
    }

    #[test]
    fn invalid_host() {
        let result = build_uri("http://local host", "/path", &HttpParams::new());

        assert!(matches!(result, Err(ApiError::InvalidUri { .. })));
    }

    #[tokio::test]
    async fn fetch_forex_rates() {
        let (address, seen) = serve(
            StatusCode::OK,
            r#"[{"source":"CurrencyLayer","rates":{"USDGHS":{"buyRate":15.05,"sellRate":15.35}}}]"#,
            Duration::ZERO,
        );

        let sources = api(address).forex_rates().await.expect("in test");

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].source, "CurrencyLayer");
        assert_eq!(*seen.lock(), vec!["GET /api/forex-rates ".to_owned()]);
    }

    #[tokio::test]
    async fn post_update_rate_as_json() {
        let (address, seen) = serve(StatusCode::OK, "", Duration::ZERO);

        api(address)
            .update_rate(UpdateRateRequest {
                source: "CurrencyLayer".into(),
                currency: "USDGHS".into(),
            })
            .await
            .expect("in test");

        assert_eq!(
            *seen.lock(),
            vec![r#"POST /api/update-rate {"source":"CurrencyLayer","currency":"USDGHS"}"#.to_owned()]
        );
    }

    #[tokio::test]
    async fn request_consolidated_rate() {
        let (address, seen) = serve(
            StatusCode::OK,
            r#"{"from":"USD","to":"AED","rate":1.2}"#,
            Duration::ZERO,
        );

        let rate = api(address)
            .consolidated_rate("USD".into(), "AED".into())
            .await
            .expect("in test");

        assert_eq!(rate.rate, dec!(1.2));
        assert_eq!(
            *seen.lock(),
            vec!["GET /api/consolidated-rate?from=USD&to=AED ".to_owned()]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (address, _) = serve(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Missing 'from' or 'to' parameter."}"#,
            Duration::ZERO,
        );

        let result = api(address)
            .consolidated_rate("USD".into(), "".into())
            .await;

        match result {
            Err(ApiError::Status { status, content }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(content.contains("Missing"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_an_error() {
        let (address, _) = serve(StatusCode::OK, "<html>", Duration::ZERO);

        let result = api(address).forex_rates().await;

        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn hung_request_times_out() {
        let (address, _) = serve(StatusCode::OK, "[]", Duration::from_secs(5));
        let api = HttpRatesApi::new(&format!("http://{address}"), Duration::from_millis(50));

        let result = api.forex_rates().await;

        assert!(matches!(result, Err(ApiError::Timeout(_))));
    }
}
