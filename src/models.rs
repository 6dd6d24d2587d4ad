pub mod excel;
pub mod item;
pub mod user_sheet;
pub mod web;
