//! Library components of the event log filter CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
