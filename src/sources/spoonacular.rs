use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::{SourceConfig, MAX_BATCH_SIZE};
use crate::error::EnrichError;
use crate::model::RawRecipe;
use crate::sources::RecipeSource;

const SEARCH_PATH: &str = "/recipes/complexSearch";

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(alias = "recipes", default)]
    results: Vec<RawRecipe>,
}

/// Fetches one page of recipes, with their ingredient lists, from Spoonacular
pub struct SpoonacularSource {
    client: Client,
    api_key: String,
    base_url: String,
    batch_size: u32,
    offset: u32,
    timeout: Duration,
}

fn build_client(timeout: Duration) -> Result<Client, EnrichError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent("Mozilla/5.0 (compatible; DishCraftEnrich/1.0)")
        .build()?)
}

impl SpoonacularSource {
    /// Create a source from configuration
    pub fn new(config: &SourceConfig) -> Result<Self, EnrichError> {
        let api_key = config.resolve_api_key().ok_or(EnrichError::MissingApiKey)?;
        let timeout = Duration::from_secs(config.timeout);

        Ok(SpoonacularSource {
            client: build_client(timeout)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            batch_size: config.batch_size.clamp(1, MAX_BATCH_SIZE),
            offset: config.offset,
            timeout,
        })
    }

    /// Replace the request timeout, keeping sub-second precision
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, EnrichError> {
        self.client = build_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularSource {
            client: Client::new(),
            api_key,
            base_url,
            batch_size: MAX_BATCH_SIZE,
            offset: 0,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl RecipeSource for SpoonacularSource {
    fn source_name(&self) -> &str {
        "spoonacular"
    }

    async fn fetch_batch(&self) -> Result<Vec<RawRecipe>, EnrichError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        debug!(
            "GET {} (number={}, offset={})",
            url, self.batch_size, self.offset
        );

        // reqwest errors carry the request URL, and the key is in its query
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.clone()),
                ("number", self.batch_size.to_string()),
                ("offset", self.offset.to_string()),
                ("addRecipeInformation", "true".to_string()),
                ("fillIngredients", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| EnrichError::FetchError(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::PAYMENT_REQUIRED || status == StatusCode::TOO_MANY_REQUESTS {
            error!(
                "Spoonacular quota exhausted (HTTP {}). Wait for the daily quota to reset, \
                 lower source.batch_size, or upgrade the API plan before retrying.",
                status.as_u16()
            );
            return Err(EnrichError::QuotaExceeded(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Spoonacular returned HTTP {}: {}", status.as_u16(), body);
            return Err(EnrichError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| EnrichError::FetchError(e.without_url()))?;
        let page: SearchPage = serde_json::from_str(&body)?;
        info!("Fetched {} recipes from Spoonacular", page.results.len());
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_fetch_batch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiKey".into(), "fake_api_key".into()),
                Matcher::UrlEncoded("number".into(), "100".into()),
                Matcher::UrlEncoded("fillIngredients".into(), "true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "results": [
                        {"id": 1, "title": "Pilaf", "extendedIngredients": [
                            {"name": "rice", "originalName": "1 cup rice"},
                            {"originalName": "olive oil"}
                        ]}
                    ],
                    "offset": 0,
                    "number": 100,
                    "totalResults": 1
                }"#,
            )
            .create_async()
            .await;

        let source = SpoonacularSource::with_base_url("fake_api_key".to_string(), server.url());
        let recipes = source.fetch_batch().await.unwrap();

        assert_eq!(recipes.len(), 1);
        let labels: Vec<&str> = recipes[0].ingredient_labels().collect();
        assert_eq!(labels, vec!["rice", "olive oil"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recipes_key_accepted() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"recipes": [{"id": 9, "extendedIngredients": [{"name": "kale"}]}]}"#)
            .create_async()
            .await;

        let source = SpoonacularSource::with_base_url("fake_api_key".to_string(), server.url());
        let recipes = source.fetch_batch().await.unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, Some(9));
        assert_eq!(recipes[0].ingredient_labels().next(), Some("kale"));
    }

    #[tokio::test]
    async fn test_network_error_hides_api_key() {
        let source = SpoonacularSource::with_base_url(
            "SUPER_SECRET_KEY".to_string(),
            "http://127.0.0.1:1".to_string(),
        );

        let err = source.fetch_batch().await.unwrap_err();
        assert!(matches!(err, EnrichError::FetchError(_)));
        assert!(!err.to_string().contains("SUPER_SECRET_KEY"), "{}", err);
        assert!(!format!("{:?}", err).contains("SUPER_SECRET_KEY"));
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(402)
            .with_body(r#"{"status": "failure", "code": 402}"#)
            .create_async()
            .await;

        let source = SpoonacularSource::with_base_url("fake_api_key".to_string(), server.url());
        let result = source.fetch_batch().await;

        assert!(matches!(result, Err(EnrichError::QuotaExceeded(402))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let source = SpoonacularSource::with_base_url("fake_api_key".to_string(), server.url());
        match source.fetch_batch().await {
            Err(EnrichError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected UpstreamStatus, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let source = SpoonacularSource::with_base_url("fake_api_key".to_string(), server.url());
        assert!(matches!(
            source.fetch_batch().await,
            Err(EnrichError::JsonError(_))
        ));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = SourceConfig {
            api_key: Some(" ".to_string()),
            ..SourceConfig::default()
        };
        assert!(matches!(
            SpoonacularSource::new(&config),
            Err(EnrichError::MissingApiKey)
        ));
    }

    #[test]
    fn test_batch_size_is_clamped() {
        let config = SourceConfig {
            api_key: Some("key".to_string()),
            batch_size: 500,
            ..SourceConfig::default()
        };
        let source = SpoonacularSource::new(&config).unwrap();
        assert_eq!(source.batch_size(), 100);
        assert_eq!(source.source_name(), "spoonacular");
        assert_eq!(source.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_sub_second_timeout_kept() {
        let config = SourceConfig {
            api_key: Some("key".to_string()),
            ..SourceConfig::default()
        };
        let source = SpoonacularSource::new(&config)
            .unwrap()
            .with_timeout(Duration::from_millis(1500))
            .unwrap();
        assert_eq!(source.timeout(), Duration::from_millis(1500));
    }
}
