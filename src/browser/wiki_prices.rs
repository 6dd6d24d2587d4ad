use std::time::Duration;

use reqwest::{header::{self, HeaderMap, HeaderValue}, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::FetchError,
    models::{
        user_sheet::UserInfo,
        web::{HourlyResponse, LatestResponse, MappingItem, ENDPOINT_HOURLY, ENDPOINT_LATEST, ENDPOINT_MAPPING},
    },
};

/// The three datasets a sync needs.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn fetch_mapping(&self, user: &UserInfo) -> Result<Vec<MappingItem>, FetchError>;
    async fn fetch_latest(&self, user: &UserInfo) -> Result<LatestResponse, FetchError>;
    async fn fetch_hourly(&self, user: &UserInfo) -> Result<HourlyResponse, FetchError>;
}

/// Client for the public OSRS price api.
#[derive(Debug, Clone)]
pub struct WikiPrices {
    client: Client,
    base_url: String,
}

impl WikiPrices {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout { builder = builder.timeout(t) }

        Ok(WikiPrices {
            client: builder.build().map_err(FetchError::Client)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, user: &UserInfo) -> Result<T, FetchError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "GET");

        let response = self.client.get(&url)
            .headers(identity_headers(user)?)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint: url.clone(), source })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(FetchError::Status {
                endpoint: url,
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        response.json::<T>()
            .await
            .map_err(|source| FetchError::Decode { endpoint: url, source })
    }
}

impl PriceSource for WikiPrices {
    async fn fetch_mapping(&self, user: &UserInfo) -> Result<Vec<MappingItem>, FetchError> {
        self.get_json(ENDPOINT_MAPPING, user).await
    }

    async fn fetch_latest(&self, user: &UserInfo) -> Result<LatestResponse, FetchError> {
        self.get_json(ENDPOINT_LATEST, user).await
    }

    async fn fetch_hourly(&self, user: &UserInfo) -> Result<HourlyResponse, FetchError> {
        self.get_json(ENDPOINT_HOURLY, user).await
    }
}

/// The api asks for a descriptive User-Agent plus a way to reach whoever runs the tool.
pub fn identity_headers(user: &UserInfo) -> Result<HeaderMap, FetchError> {
    let user_agent = HeaderValue::from_str(&user.identity)
        .map_err(|_| FetchError::InvalidHeader { field: "User-Agent", value: user.identity.clone() })?;
    let from = HeaderValue::from_str(&user.contact)
        .map_err(|_| FetchError::InvalidHeader { field: "From", value: user.contact.clone() })?;

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, user_agent);
    headers.insert(header::FROM, from);
    Ok(headers)
}
