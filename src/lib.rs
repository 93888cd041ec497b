//! CSV analysis pipeline: load a file, describe it, plot it, and write a PDF report.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod state;
pub mod ui;
