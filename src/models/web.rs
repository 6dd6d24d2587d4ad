use indexmap::IndexMap;
use serde::Deserialize;

pub const API_BASE_DEFAULT: &str = "https://prices.runescape.wiki/api/v1/osrs";

pub const ENDPOINT_MAPPING: &str = "mapping";
pub const ENDPOINT_LATEST: &str = "latest";
pub const ENDPOINT_HOURLY: &str = "1h";

/// One entry of `/mapping`. The endpoint sends a lot more (examine, limit, alch values...)
/// which we don't need.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MappingItem {
    pub id: u64,
    pub name: String,
}

/// `/latest`
#[derive(Debug, Deserialize, Default)]
pub struct LatestResponse {
    #[serde(default)]
    pub data: IndexMap<String, LatestPrice>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct LatestPrice {
    #[serde(default)]
    pub high: Option<i64>,
    #[serde(default)]
    pub low: Option<i64>,
}

/// `/1h`
#[derive(Debug, Deserialize, Default)]
pub struct HourlyResponse {
    #[serde(default)]
    pub data: IndexMap<String, HourlyVolume>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct HourlyVolume {
    #[serde(default, rename = "highPriceVolume")]
    pub high_price_volume: Option<i64>,
    #[serde(default, rename = "lowPriceVolume")]
    pub low_price_volume: Option<i64>,
}
