//! Connection handle, status, and naming types.

pub mod handle;
pub mod name;
pub mod status;

#[cfg(test)]
pub(crate) mod fake;
