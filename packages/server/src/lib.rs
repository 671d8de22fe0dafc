//! Room-scoped WebSocket chat relay.
//!
//! Clients connect to `/chat/{room}`; every JSON message a member sends is
//! stamped with a `received` time and broadcast to all members of the room,
//! unless it repeats the previous message within the dedup window.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod app;
pub mod config;
