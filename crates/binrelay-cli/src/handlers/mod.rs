//! Command handlers.

pub mod serve;
