// Fee API repository implementation
use crate::application::fee_history_repository::FeeHistoryRepository;
use crate::domain::fee_history::{ChartDuration, FeeHistoryRaw};
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct FeeApiRepository {
    base_url: String,
    client: reqwest::Client,
}

impl FeeApiRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn build_history_url(&self, duration: ChartDuration) -> String {
        format!(
            "{}/fees/history?duration={}",
            self.base_url,
            urlencoding::encode(duration.as_str())
        )
    }
}

#[async_trait]
impl FeeHistoryRepository for FeeApiRepository {
    async fn fetch_fee_history(&self, duration: ChartDuration) -> Result<FeeHistoryRaw> {
        let url = self.build_history_url(duration);
        tracing::debug!("Requesting fee history: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to fee API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Fee API request failed with status {}: {}", status, body);
        }

        response
            .json::<FeeHistoryRaw>()
            .await
            .context("Failed to parse fee history response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    #[test]
    fn test_build_history_url() {
        let repository = FeeApiRepository::new("https://fees.example.com/api/".to_string());

        assert_eq!(
            repository.build_history_url(ChartDuration::OneMonth),
            "https://fees.example.com/api/fees/history?duration=1m"
        );
    }

    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_parses_raw_series() {
        let router = Router::new().route(
            "/fees/history",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("duration").map(String::as_str), Some("1w"));
                Json(serde_json::json!({
                    "start": 1000,
                    "tick": 60,
                    "min": [1.0, 2.0],
                    "avg": [1.5, 2.5],
                }))
            }),
        );
        let repository = FeeApiRepository::new(serve(router).await);

        let raw = repository
            .fetch_fee_history(ChartDuration::OneWeek)
            .await
            .unwrap();

        assert_eq!(
            raw,
            FeeHistoryRaw {
                start: 1000,
                tick: 60,
                min: vec![1.0, 2.0],
                avg: vec![1.5, 2.5],
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/fees/history",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let repository = FeeApiRepository::new(serve(router).await);

        let err = repository
            .fetch_fee_history(ChartDuration::OneDay)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("503"), "{}", message);
        assert!(message.contains("maintenance"), "{}", message);
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let router = Router::new().route("/fees/history", get(|| async { "not json" }));
        let repository = FeeApiRepository::new(serve(router).await);

        let err = repository
            .fetch_fee_history(ChartDuration::OneDay)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse fee history response");
    }
}
