pub mod client;
pub mod config;
pub mod monitor;
pub mod state;
pub mod ui;
pub mod web;
