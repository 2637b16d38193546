pub mod action;
pub mod args;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod logging;
pub mod providers;
pub mod theme;
pub mod validation;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod pages;
#[cfg(feature = "tui")]
pub mod panes;
#[cfg(feature = "tui")]
pub mod tui;
