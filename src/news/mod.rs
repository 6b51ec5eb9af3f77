//! News listing

mod types;

use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::guard::RequestGuard;

pub use types::*;

/// Client for the news endpoint
pub struct NewsClient {
    config: Arc<PortalConfig>,
    client: Client,
    guard: RequestGuard,
}

impl NewsClient {
    /// Create a new NewsClient
    pub(crate) fn new(config: Arc<PortalConfig>, client: Client) -> Self {
        Self {
            config,
            client,
            guard: RequestGuard::new(),
        }
    }

    /// Fetch the full news list in server order
    pub async fn list(&self) -> Result<Vec<Item>, Error> {
        let _in_flight = self.guard.begin()?;
        let url = self.config.endpoint("/news");

        let body = Fetch::get(&self.client, &url)
            .header("X-Client-Info", &self.config.options.client_info)
            .execute::<NewsResponse>()
            .await?;

        let items = body.news.unwrap_or_default();
        if items.is_empty() {
            warn!("API returned no news");
        } else {
            info!("Fetched {} news item(s)", items.len());
        }
        Ok(items)
    }

    /// Whether a fetch is currently pending
    pub fn is_loading(&self) -> bool {
        self.guard.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn news_for(server: &MockServer) -> NewsClient {
        let config = PortalConfig::new(&server.uri()).unwrap();
        NewsClient::new(Arc::new(config), Client::new())
    }

    #[test]
    fn test_list_keeps_server_order() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/news"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "news": [
                        { "_id": "b", "titulo": "Second" },
                        { "_id": "a", "titulo": "First" }
                    ]
                })))
                .mount(&mock_server)
                .await;

            let items = news_for(&mock_server).list().await.unwrap();
            let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["b", "a"]);
        });
    }

    #[test]
    fn test_list_reports_status() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/news"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&mock_server)
                .await;

            let result = news_for(&mock_server).list().await;
            assert!(matches!(result, Err(Error::Api { status: 500, .. })));
        });
    }

    #[test]
    fn test_list_missing_key_is_empty() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/news"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "news": null })))
                .mount(&mock_server)
                .await;

            let client = news_for(&mock_server);
            assert!(client.list().await.unwrap().is_empty());
            assert!(!client.is_loading());
        });
    }
}
