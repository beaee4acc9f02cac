mod store;

pub use store::{DashboardState, SharedState, View, SPINNER_FRAMES};
