pub mod color;
pub mod config;
pub mod consts;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod metrics;
pub mod sampling;
pub mod scoring;
pub mod session;
