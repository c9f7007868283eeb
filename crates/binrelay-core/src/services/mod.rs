//! Application services orchestrating the relay pipeline.

mod relay_service;

pub use relay_service::RelayService;
