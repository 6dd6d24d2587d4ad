pub mod item_wiki;
