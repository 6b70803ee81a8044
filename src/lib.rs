#![warn(missing_docs)]
#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

pub(crate) mod line;
pub(crate) mod store;
pub(crate) mod value;

pub use store::ConfigStore;
pub use value::FromEntry;
