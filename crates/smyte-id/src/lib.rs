#![doc = include_str!("../README.md")]

#[cfg(feature = "base32")]
mod base32;
mod be_bytes;
mod error;
mod id;
#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "base32")]
pub use crate::base32::*;
pub use crate::error::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
