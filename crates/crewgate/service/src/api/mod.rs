//! API surface of the crewgate daemon.

pub mod rest;

pub use rest::router::create_router;
