use indexmap::IndexSet;

use crate::models::item::{ItemMapping, MarketData, PriceRow};

/// One row per distinct mapped name, in mapping order. Items the market data doesn't
/// mention still get a row, with zeros.
pub fn join_rows(mapping: &ItemMapping, market: &MarketData) -> Vec<PriceRow> {
    let names: IndexSet<&String> = mapping.values().collect();

    names.into_iter()
        .map(|name| {
            let price = market.prices.get(name).copied().unwrap_or_default();
            PriceRow {
                name: name.clone(),
                high: price.high,
                low: price.low,
                volume: market.volumes.get(name).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Names with any price entry at all.
pub fn count_updated(rows: &[PriceRow], market: &MarketData) -> usize {
    rows.iter().filter(|row| market.prices.contains_key(&row.name)).count()
}

/// How many names appear under more than one id.
pub fn count_duplicate_names(mapping: &ItemMapping) -> usize {
    let distinct: IndexSet<&String> = mapping.values().collect();
    mapping.len() - distinct.len()
}
