use indexmap::IndexMap;

use crate::models::{
    item::{ItemMapping, ItemPrice, MarketData},
    web::{HourlyResponse, LatestResponse, MappingItem},
};

/// A repeated id keeps its first position but takes the later name.
pub fn build_mapping(items: Vec<MappingItem>) -> ItemMapping {
    let mut mapping: ItemMapping = IndexMap::with_capacity(items.len());
    for item in items {
        mapping.insert(item.id.to_string(), item.name);
    }
    mapping
}

// Ids the mapping doesn't know about are dropped. Missing prices count as 0.
pub fn prices_by_name(latest: &LatestResponse, mapping: &ItemMapping) -> IndexMap<String, ItemPrice> {
    let mut prices: IndexMap<String, ItemPrice> = IndexMap::new();

    for (item_id, price) in &latest.data {
        if let Some(name) = mapping.get(item_id) {
            prices.insert(name.clone(), ItemPrice {
                high: price.high.unwrap_or(0),
                low: price.low.unwrap_or(0),
            });
        }
    }
    prices
}

/// Total 1h volume per name, high side + low side.
pub fn volumes_by_name(hourly: &HourlyResponse, mapping: &ItemMapping) -> IndexMap<String, i64> {
    let mut volumes: IndexMap<String, i64> = IndexMap::new();

    for (item_id, vol) in &hourly.data {
        if let Some(name) = mapping.get(item_id) {
            let total = vol.high_price_volume.unwrap_or(0) + vol.low_price_volume.unwrap_or(0);
            volumes.insert(name.clone(), total);
        }
    }
    volumes
}

pub fn market_data(latest: &LatestResponse, hourly: &HourlyResponse, mapping: &ItemMapping) -> MarketData {
    MarketData {
        prices: prices_by_name(latest, mapping),
        volumes: volumes_by_name(hourly, mapping),
    }
}
