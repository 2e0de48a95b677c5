//! Minimal terminal runtime: a fixed-rate tick, a fixed-rate render, and
//! crossterm events in between.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
