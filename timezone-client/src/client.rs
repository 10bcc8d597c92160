use std::time::Duration;

use async_trait::async_trait;
use itinerary_core::{
    Coordinates, OffsetHours, OffsetResolver, ResolveError,
    resolve_error::{FailedRequestSnafu, TransportSnafu},
};
use reqwest::{ClientBuilder, StatusCode};
use serde::Deserialize;

use crate::TimezoneResponse;

/// Connection settings for the timezone lookup service: the endpoint url
/// and the API credential sent with every request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiClientConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct TimezoneClient {
    http_client: reqwest::Client,
    config: ApiClientConfig,
}

impl TimezoneClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ResolveError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::new(60, 0))
            .build()
            .map_err(|e| TransportSnafu { message: e.to_string() }.build())?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub async fn lookup_offset(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Result<OffsetHours, ResolveError> {
        let request = self.http_client.get(&self.config.url).query(&[
            ("location", coordinates.location_param()),
            ("timestamp", timestamp.to_string()),
            ("key", self.config.key.clone()),
        ]);

        let response = request
            .send()
            .await
            .map_err(|e| TransportSnafu { message: e.to_string() }.build())?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| TransportSnafu { message: e.to_string() }.build())?;
            return FailedRequestSnafu {
                url: self.config.url.clone(),
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        let body: TimezoneResponse = response
            .json()
            .await
            .map_err(|e| TransportSnafu { message: e.to_string() }.build())?;

        body.total_offset_hours()
    }
}

#[async_trait]
impl OffsetResolver for TimezoneClient {
    async fn resolve(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Result<OffsetHours, ResolveError> {
        self.lookup_offset(coordinates, timestamp).await
    }
}
