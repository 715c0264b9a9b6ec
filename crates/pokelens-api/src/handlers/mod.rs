//! Request handlers, one module per endpoint group.

pub mod health;
pub mod identify;
pub mod pokemon;
