//! Risetrack HTTP server.
//!
//! A thin actix-web JSON layer over risetrack-core: CRUD for wake-up
//! records plus the streak endpoint. All request validation happens here,
//! before the core is invoked.

pub mod api;
