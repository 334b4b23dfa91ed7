use std::time::Instant;

use chat_core::config::{Config, ProxyAuth};
use log::{error, info};
use reqwest::{Client, Proxy, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};

fn apply_proxy_auth(proxy: Proxy, auth: Option<&ProxyAuth>) -> Proxy {
    let Some(auth) = auth else {
        return proxy;
    };
    if auth.username.is_empty() {
        return proxy;
    }
    proxy.basic_auth(&auth.username, &auth.password)
}

/// Builds the HTTP client shared by the token exchange, the agent call and
/// graph queries. Only the proxies named in `config` are used.
pub fn build_http_client(config: &Config) -> reqwest::Result<ClientWithMiddleware> {
    let mut builder = Client::builder().no_proxy();
    if !config.http_proxy.is_empty() {
        let proxy = Proxy::http(&config.http_proxy)?;
        builder = builder.proxy(apply_proxy_auth(proxy, config.http_proxy_auth.as_ref()));
    }
    if !config.https_proxy.is_empty() {
        let proxy = Proxy::https(&config.https_proxy)?;
        builder = builder.proxy(apply_proxy_auth(proxy, config.https_proxy_auth.as_ref()));
    }
    let client = builder.build()?;

    // No retry middleware: every failure is reported to the user as-is.
    Ok(ClientBuilder::new(client).with(RequestLogger).build())
}

/// Logs every request with its status and latency. Headers are not logged
/// since they carry credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let mut url = req.url().clone();
        url.set_query(None);

        info!("Sending {} request to {}", method, url);
        let start_time = Instant::now();
        let result = next.run(req, extensions).await;

        match &result {
            Ok(resp) => {
                info!(
                    "Got response from {} after {:?} with status {}",
                    url,
                    start_time.elapsed(),
                    resp.status()
                );
            }
            Err(reqwest_middleware::Error::Reqwest(e)) => {
                error!(
                    "Failed HTTP request to {} after {:?}: {}",
                    url,
                    start_time.elapsed(),
                    e
                );
                if e.is_timeout() {
                    error!("Request timed out");
                }
                if e.is_connect() {
                    error!("Connection error");
                }
                if e.is_body() {
                    error!("Body error");
                }
                if e.is_decode() {
                    error!("Decode error");
                }
            }
            Err(e) => {
                error!("Failed HTTP request to {}: {}", url, e);
            }
        }

        result
    }
}
