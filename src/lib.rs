//! Solar lead generation: ZIP-to-utility directory plus the multi-step
//! lead funnel and its delivery pipeline.

pub mod api;
pub mod compliance;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod funnel;
pub mod ids;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod storage;
pub mod validation;
pub mod webhook;
pub mod zip_states;

pub use config::Config;
pub use error::FunnelError;
pub use funnel::{FunnelSession, Step};
pub use pipeline::LeadPipeline;
