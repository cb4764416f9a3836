//! The Keccak-f\[1600\] permutation.
//!
//! The state is kept as 25 little-endian 64-bit lanes, lane `(x, y)` at index `x + 5 * y`.
//! Sponges exchange data with the state byte-wise through [`KeccakState::xor_block`]
//! and [`KeccakState::as_bytes`], which view the lanes as 200 bytes.
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of the permutation, in bytes.
pub const STATE_BYTES: usize = 200;

/// Number of rounds of Keccak-f\[1600\].
pub const ROUNDS: usize = 24;

/// Iota round constants.
const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rho rotation offsets, in the order lanes are visited by [`PILN`].
const ROTC: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Pi lane permutation: the walk starting at lane 1 visits every lane but (0, 0).
const PILN: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply the 24 rounds of Keccak-f\[1600\] to `lanes` in place.
pub fn f1600(lanes: &mut [u64; 25]) {
    for rc in RC {
        theta(lanes);
        rho_pi(lanes);
        chi(lanes);
        // iota
        lanes[0] ^= rc;
    }
}

#[inline(always)]
fn theta(lanes: &mut [u64; 25]) {
    let mut parity = [0u64; 5];
    for (x, p) in parity.iter_mut().enumerate() {
        *p = lanes[x] ^ lanes[x + 5] ^ lanes[x + 10] ^ lanes[x + 15] ^ lanes[x + 20];
    }
    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in (0..25).step_by(5) {
            lanes[y + x] ^= d;
        }
    }
}

#[inline(always)]
fn rho_pi(lanes: &mut [u64; 25]) {
    let mut carry = lanes[1];
    for (&dst, &rot) in PILN.iter().zip(ROTC.iter()) {
        let next = lanes[dst];
        lanes[dst] = carry.rotate_left(rot);
        carry = next;
    }
}

#[inline(always)]
fn chi(lanes: &mut [u64; 25]) {
    for y in (0..25).step_by(5) {
        let mut row = [0u64; 5];
        row.copy_from_slice(&lanes[y..y + 5]);
        for x in 0..5 {
            lanes[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }
}

/// The 1600-bit state of a Keccak sponge.
///
/// Always starts zeroed, and is wiped on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct KeccakState([u64; 25]);

impl KeccakState {
    /// Permute the state with Keccak-f\[1600\].
    #[inline]
    pub fn permute(&mut self) {
        f1600(&mut self.0);
    }

    /// XOR `block` into the first `block.len()` bytes of the state.
    ///
    /// Callers only ever pass the rate portion; the capacity is not touched.
    pub fn xor_block(&mut self, block: &[u8]) {
        debug_assert!(block.len() <= STATE_BYTES);
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.0);
        bytes
            .iter_mut()
            .zip(block)
            .for_each(|(state_byte, input_byte)| *state_byte ^= input_byte);
    }

    /// The state viewed as 200 bytes, lanes in little-endian order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }

    /// The raw lanes.
    pub fn lanes(&self) -> &[u64; 25] {
        &self.0
    }
}

impl ::core::fmt::Debug for KeccakState {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        // Ensure that the state isn't accidentally logged
        write!(f, "KeccakState(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    /// First lanes of Keccak-f[1600] applied to the all-zero state,
    /// from the Keccak team's intermediate values.
    #[test]
    fn test_zero_state() {
        let mut lanes = [0u64; 25];
        f1600(&mut lanes);
        assert_eq!(lanes[0], 0xF1258F7940E1DDE7);
        assert_eq!(lanes[1], 0x84D5CCF933C0478A);
    }

    /// Our permutation must agree with the `keccak` crate on arbitrary states.
    #[test]
    fn test_against_reference_permutation() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1600);
        for _ in 0..64 {
            let mut ours: [u64; 25] = rng.gen();
            let mut reference = ours;
            f1600(&mut ours);
            keccak::f1600(&mut reference);
            assert_eq!(ours, reference);
        }
    }

    #[test]
    fn test_xor_block_touches_only_prefix() {
        let mut state = KeccakState::default();
        state.xor_block(&[0xff; 136]);
        assert!(state.as_bytes()[..136].iter().all(|&b| b == 0xff));
        assert!(state.as_bytes()[136..].iter().all(|&b| b == 0));
        // lanes are little-endian
        let mut state = KeccakState::default();
        state.xor_block(&[0x01, 0x02]);
        assert_eq!(state.lanes()[0], 0x0201);
    }

    #[test]
    fn test_debug_hides_state() {
        let mut state = KeccakState::default();
        state.xor_block(b"secret");
        assert_eq!(format!("{:?}", state), "KeccakState(..)");
    }
}
