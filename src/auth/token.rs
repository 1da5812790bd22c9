//! Token-side models: the issued access token and the redacting secret wrapper.

pub mod access;
pub mod secret;
