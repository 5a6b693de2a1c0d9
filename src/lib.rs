pub mod analysis;
pub mod banner;
pub mod cache;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod logging;
pub mod prompts;
pub mod provider;
pub mod shutdown;
pub mod web;
