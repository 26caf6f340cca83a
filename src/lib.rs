pub mod analyzers;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod output;
pub mod service;
pub mod source;
