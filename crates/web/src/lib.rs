//! Server-rendered HTTP frontend: routing, templates, flash messages.

pub mod app;
