//! Provider-facing configuration (data) and strategies (behavior).
//!
//! `config` exposes validated metadata (`ProviderConfig`) covering the authorize URL
//! template, the HTTPS token endpoint, the token request verb, the default scope list, and
//! the client authentication preference. `strategy` defines [`ProviderStrategy`], an
//! HTTP-client-agnostic hook that extracts tokens from responses and may augment outgoing
//! token requests. `globus` ships the Globus Auth preset.

pub mod config;
pub mod globus;
pub mod strategy;

pub use config::*;
pub use strategy::*;
