use reqwest::header::CONTENT_TYPE;

use super::{ApiRequest, ApiResponse, HttpBackend, Method};
use crate::config::ClientConfig;

/// Native [`HttpBackend`] on top of a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_base: String,
}

impl ReqwestBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = request.json_body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let backend = ReqwestBackend::new(&ClientConfig::new("http://localhost:8080/api/"));
        assert_eq!(backend.url("/rooms/3/messages"), "http://localhost:8080/api/rooms/3/messages");
    }
}
