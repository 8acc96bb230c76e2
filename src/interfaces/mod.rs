//! Adapters between the session and the outside world: event scripts in,
//! JSON lines out.

pub mod csv;
pub mod output_writer;
