//! Launch records dashboard.
//!
//! Loads a table of launches once, then recomputes a success/failure pie and
//! a payload/outcome scatter whenever the selected site or payload range
//! changes. Served over HTTP ([`web`]) or in a native window ([`app`]).

pub mod app;
pub mod args;
pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
pub mod web;
