//! Request handlers, one module per endpoint group.

pub mod health;
pub mod posts;
mod shared;
pub mod warmup;
