//! Core application primitives (analysis cycle, scheduler, HTTP API)

pub mod http;
pub mod runtime;
pub mod scheduler;

pub use http::*;
pub use runtime::*;
pub use scheduler::*;
