//! Application layer: the request assembler and the two state machines.
//!
//! [`session::CheckoutSession`] ties them together behind a single event
//! entry point and can be driven from a `tokio` channel acting as the host
//! event queue.

pub mod assembler;
pub mod challenge;
pub mod session;
pub mod wizard;
