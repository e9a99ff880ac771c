//! A set of utility structs and functions used when operating the core.

pub mod number;
pub mod time;

#[cfg(test)]
pub(crate) mod test;
