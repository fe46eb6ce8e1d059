//! Ethics Bowl Academy Player - unified client crate.
//!
//! Layering follows the usual inward-pointing rule:
//! - `application` holds the interaction engine, editor draft, and services;
//!   it depends only on the domain crate and the outbound ports.
//! - `ports` defines the outbound contracts (step repository, asset storage).
//! - `infrastructure` implements the ports (HTTP document API, in-memory).
//! - `ui` is the Dioxus presentation layer; it talks to services only.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod ui;
