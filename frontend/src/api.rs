use daily_diary::{ApiRequest, ApiResponse, HttpBackend, Method};
use gloo_net::http::Request;

/// Root of the diary API, served from the same origin as the page.
pub const API_BASE: &str = "/api";

/// [`HttpBackend`] on the browser's `fetch`.
#[derive(Clone, Copy, Default)]
pub struct GlooBackend;

impl HttpBackend for GlooBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let url = format!("{API_BASE}{}", request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };

        let resp = match request.json_body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| format!("Request build error: {e}"))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| format!("Network error: {e}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Read error: {e}"))?;
        Ok(ApiResponse { status, body })
    }
}
