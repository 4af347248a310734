//! UI module for p2p-assist.
//!
//! This module contains all UI rendering logic including:
//! - Main layout, header tabs and chat transcript
//! - Tariff tables with the region toggle
//! - Gradient utilities
//! - Text processing

pub mod gradient;
pub mod render;
pub mod tariffs;
pub mod text;

pub use render::ui;
