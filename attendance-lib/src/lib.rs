//! Attendance explorer library
//!
//! Client, normalization and tabular exploration for an attendance and
//! punch-clock backend. Rows fetched through [`AttendanceClient`] are
//! normalized by [`normalize`] and handed to an [`explorer::Explorer`]
//! configured with one of the [`views`] presets, which searches, sorts,
//! paginates, renders and exports them.

pub mod api;
pub mod error;
pub mod explorer;
pub mod export;
pub mod model;
pub mod normalize;
pub mod views;

mod client;

pub use client::*;
