//! Page content of each design.

pub(crate) mod fox;
pub(crate) mod panda;
pub(crate) mod pawprint;
