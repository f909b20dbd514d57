//! Task tree engine and its surfaces.
//!
//! The core is the id-addressed tree in [`tree`], the derived statistics in
//! [`stats`] and [`view`], and the [`session::Session`] that owns them. The
//! [`store`] and [`sync`] modules put a task file behind it; [`cmd`] and [`tui`]
//! are the `tt` binary's two front ends.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod session;
pub mod stats;
pub mod store;
pub mod sync;
pub mod task;
pub mod tree;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

