//! Core dashboard machinery: state, polling, routing and the event loop

pub mod app;
pub mod events;
pub mod history;
pub mod poller;
pub mod router;
pub mod state;
