//! `Tasklist`: terminal client for a remote todo list service.

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod net;
pub mod ui;
