//! che-gather - diagnostic data collector for Eclipse Che and OpenShift Dev Spaces

pub mod archive;
pub mod cli;
pub mod client;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod debug_start;
pub mod error;
pub mod export;
pub mod output;
pub mod plan;
pub mod profile;
pub mod topology;
