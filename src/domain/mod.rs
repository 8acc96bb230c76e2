//! Domain types: the field store, request value objects and the ports to
//! host-provided collaborators.

pub mod card;
pub mod field_store;
pub mod ports;
pub mod request;
