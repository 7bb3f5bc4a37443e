//! Command implementations for the assetprov CLI

pub mod completions;
pub mod helpers;
pub mod provision;
pub mod resolve;
pub mod status;
