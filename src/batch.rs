//! Hashing many independent messages at once.
//!
//! Every message gets its own sponge, so the work is embarrassingly parallel.
//! With the `parallel` feature (enabled by default) messages are spread over the
//! [`rayon`] thread pool; otherwise they are hashed one after the other.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::hash::{Mode, Sha3};

fn digest_vec(mode: Mode, input: &[u8]) -> Vec<u8> {
    let mut digest = vec![0u8; mode.digest_len()];
    Sha3::digest_into(mode, input, &mut digest);
    digest
}

/// Hashes every element of `inputs` under `mode`.
///
/// The `i`-th digest is the digest of the `i`-th input.
pub fn hash_batch<I: AsRef<[u8]> + Sync>(mode: Mode, inputs: &[I]) -> Vec<Vec<u8>> {
    #[cfg(feature = "parallel")]
    let digests = inputs
        .par_iter()
        .map(|input| digest_vec(mode, input.as_ref()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let digests = inputs
        .iter()
        .map(|input| digest_vec(mode, input.as_ref()))
        .collect();
    digests
}
