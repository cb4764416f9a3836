//!
//! This crate implements the SHA-3 hash functions of FIPS 202
//! (SHA3-224, SHA3-256, SHA3-384 and SHA3-512) and HMAC on top of them.
//!
//! # Overview
//!
//! The library is built bottom-up:
//!
//! - the Keccak-f\[1600\] permutation ([`hash::keccak`]), a fixed transformation of a 1600-bit state;
//! - the SHA-3 sponge ([`Sha3`]), absorbing input at a rate that depends on the [`Mode`],
//!   padding it, and squeezing the digest;
//! - HMAC ([`Hmac`]), two nested sponges keyed by the inner and outer pads.
//!
//! Both [`Sha3`] and [`Hmac`] are streaming: input can be fed in chunks of any size,
//! and the result only depends on the concatenation of the chunks.
//!
//! ```
//! use sha3_hmac::{Mode, Sha3};
//!
//! let mut sponge = Sha3::new(Mode::Sha3_256);
//! sponge.update(b"").unwrap();
//! let mut digest = [0u8; 32];
//! sponge.finalize_into(&mut digest).unwrap();
//! assert_eq!(
//!     hex::encode(digest),
//!     "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
//! );
//! ```
//!
//! Instances are single-shot. Once finalized, they refuse any further input:
//!
//! ```
//! use sha3_hmac::{Hmac, Mode, Sha3Error};
//!
//! let mut mac = Hmac::new(Mode::Sha3_512, b"key");
//! mac.update(b"message").unwrap();
//! let tag = mac.finalize().unwrap();
//! assert_eq!(tag.len(), 64);
//! assert_eq!(mac.update(b"more"), Err(Sha3Error::InvalidState));
//! ```
//!
//! # One-shot functions
//!
//! [`hash()`] and [`hmac()`] compose initialization, a single update, and finalization,
//! writing the result into a caller-provided buffer.
//! [`sha3_224`], [`sha3_256`], [`sha3_384`] and [`sha3_512`] return fixed-size arrays.
//!
//! ```
//! use sha3_hmac::{hash, sha3_256, Mode};
//!
//! let mut digest = [0u8; 32];
//! hash(Mode::Sha3_256, b"abc", &mut digest).unwrap();
//! assert_eq!(digest, sha3_256(b"abc"));
//! ```
//!
//! # Batteries included
//! - [`hash::fixed`] implements the RustCrypto [`digest`] traits for the four modes,
//!   so that the hashers can be plugged into code generic over [`digest::Digest`];
//! - [`batch::hash_batch`] hashes many messages, in parallel with the `parallel` feature (default).
//!
//! # Security
//!
//! Key pads and sponge states are wiped on drop.
//! The implementation makes no attempt at resisting timing or cache side channels.

#[cfg(target_endian = "big")]
compile_error!(
    r#"
This crate doesn't support big-endian targets.
"#
);

/// Batch hashing.
pub mod batch;
/// Built-in errors.
mod errors;
/// The Keccak permutation and the SHA-3 sponge.
pub mod hash;
/// HMAC-SHA3.
mod hmac;

pub use errors::{Sha3Error, Sha3Result};
pub use hash::fixed::{sha3_224, sha3_256, sha3_384, sha3_512};
pub use hash::{hash, Mode, Sha3};
pub use hmac::{hmac, Hmac};
