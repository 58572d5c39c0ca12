//! Background Tasks Module
//!
//! Long-running tasks that maintain the cache outside the request path.

mod sweep;

pub use sweep::spawn_sweep_task;
