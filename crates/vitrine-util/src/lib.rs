#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod hash;

pub use hash::{blake3_bytes, short_hash};
