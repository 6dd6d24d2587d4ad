use indexmap::IndexMap;

/// Item id -> display name, in the order `/mapping` listed them.
pub type ItemMapping = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPrice {
    pub high: i64,
    pub low: i64,
}

/// Everything we know about the market keyed by item name.
#[derive(Debug, Default)]
pub struct MarketData {
    pub prices: IndexMap<String, ItemPrice>,
    pub volumes: IndexMap<String, i64>,
}

/// One line of the Prices sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub name: String,
    pub high: i64,
    pub low: i64,
    pub volume: i64,
}
