//! P2P Assist - terminal shipping assistant for P2P Logistics.
//!
//! This library exposes the core modules for testing and reuse.

pub mod app;
pub mod config;
pub mod input;
pub mod llm;
pub mod logging;
pub mod message;
pub mod prompt;
pub mod session;
pub mod tariffs;
pub mod ui;
