//! Relay server module
//!
//! Exposes `GET /api/quota`, which runs the collector and relays its JSON
//! document (or an error document) to the caller.

mod api;
mod server;

pub use server::{RelayServer, ServerConfig};
