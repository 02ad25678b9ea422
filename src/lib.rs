pub mod api;
pub mod cards;
pub mod config;
pub mod market;
pub mod pear;
pub mod simulation;
pub mod trades;
