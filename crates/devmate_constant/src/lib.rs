//! Shared constants for devmate.

pub mod app;
