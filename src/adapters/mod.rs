//! Adapters for the outside world: the HTTP surface and the in-process
//! stores behind the learning ports.

pub mod http;
pub mod memory;
