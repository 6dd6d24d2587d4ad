pub mod wiki_prices;
