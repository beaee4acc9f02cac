mod app;
pub mod components;
mod layout;

pub use app::{render, App};
pub use layout::{DashboardAreas, Layout};
