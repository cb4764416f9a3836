/// Statically-sized hashers for the [`digest`] traits.
pub mod fixed;
/// The Keccak-f\[1600\] permutation.
pub mod keccak;
/// SHA-3 modes and their parameters.
mod mode;
/// The SHA-3 sponge.
mod sponge;

pub use keccak::KeccakState;
pub use mode::{Mode, MAX_BLOCK_SIZE, MAX_DIGEST_LEN};
pub use sponge::{hash, Sha3};
