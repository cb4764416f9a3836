use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Sha3Error, Sha3Result};

use super::keccak::KeccakState;
use super::mode::{Mode, MAX_BLOCK_SIZE};

/// Domain separation bits of SHA-3 (`01`), followed by the first bit of the `pad10*1` rule.
const DOMAIN_SHA3: u8 = 0x06;
/// Last bit of the `pad10*1` rule.
const PAD_LAST: u8 = 0x80;

/// Where the sponge is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Absorbing,
    Squeezed,
}

/// A SHA-3 sponge for one of the four fixed-output modes.
///
/// Input is fed with any number of [`Sha3::update`] calls, in chunks of any size;
/// the digest only depends on the concatenation of the chunks.
/// [`Sha3::finalize_into`] pads, permutes and squeezes the digest, after which the
/// instance refuses any further operation.
///
/// ```
/// use sha3_hmac::{Mode, Sha3};
///
/// let mut sponge = Sha3::new(Mode::Sha3_256);
/// sponge.update(b"The quick brown fox ").unwrap();
/// sponge.update(b"jumps over the lazy dog").unwrap();
/// let digest = sponge.finalize().unwrap();
/// assert_eq!(
///     hex::encode(digest),
///     "69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04"
/// );
/// assert!(sponge.update(b"more").is_err());
/// ```
#[derive(Clone)]
pub struct Sha3 {
    state: KeccakState,
    /// Bytes received but not yet forming a full block.
    pending: [u8; MAX_BLOCK_SIZE],
    pending_len: usize,
    mode: Mode,
    phase: Phase,
}

impl Sha3 {
    /// Initializes a new sponge for `mode`, with a zeroed state.
    pub fn new(mode: Mode) -> Self {
        Self {
            state: KeccakState::default(),
            pending: [0u8; MAX_BLOCK_SIZE],
            pending_len: 0,
            mode,
            phase: Phase::Absorbing,
        }
    }

    /// Initializes a new sponge from the output size in bits (224, 256, 384 or 512).
    pub fn with_bits(bits: usize) -> Sha3Result<Self> {
        Mode::try_from(bits).map(Self::new)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bytes consumed per permutation call.
    pub fn block_size(&self) -> usize {
        self.mode.block_size()
    }

    /// Bytes written by [`Sha3::finalize_into`].
    pub fn digest_len(&self) -> usize {
        self.mode.digest_len()
    }

    /// Whether the digest has already been squeezed out.
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Squeezed
    }

    /// Absorbs `input`.
    ///
    /// Fails with [`Sha3Error::InvalidState`] once the sponge has been finalized.
    pub fn update(&mut self, input: &[u8]) -> Sha3Result<()> {
        self.check_absorbing("update")?;
        self.absorb(input);
        Ok(())
    }

    /// Pads the input, and writes the digest in the first [`Sha3::digest_len`] bytes of `output`.
    ///
    /// Fails with [`Sha3Error::InvalidState`] if the sponge was already finalized,
    /// and with [`Sha3Error::NullOutput`] if `output` is shorter than the digest.
    /// On failure `output` is left untouched.
    pub fn finalize_into(&mut self, output: &mut [u8]) -> Sha3Result<()> {
        self.check_absorbing("finalize")?;
        let digest_len = self.digest_len();
        if output.len() < digest_len {
            return Err(Sha3Error::NullOutput);
        }
        self.pad_and_squeeze(&mut output[..digest_len]);
        Ok(())
    }

    /// Like [`Sha3::finalize_into`], returning the digest in a new vector.
    pub fn finalize(&mut self) -> Sha3Result<Vec<u8>> {
        let mut digest = vec![0u8; self.digest_len()];
        self.finalize_into(&mut digest)?;
        Ok(digest)
    }

    fn check_absorbing(&self, operation: &str) -> Sha3Result<()> {
        match self.phase {
            Phase::Absorbing => Ok(()),
            Phase::Squeezed => {
                log::warn!("{} called on a finalized {} sponge", operation, self.mode);
                Err(Sha3Error::InvalidState)
            }
        }
    }

    /// Absorbs `input` without checking the phase.
    pub(crate) fn absorb(&mut self, mut input: &[u8]) {
        debug_assert_eq!(self.phase, Phase::Absorbing);
        let block_size = self.block_size();
        while !input.is_empty() {
            assert!(self.pending_len < block_size);
            let chunk_len = usize::min(input.len(), block_size - self.pending_len);
            let (chunk, rest) = input.split_at(chunk_len);

            self.pending[self.pending_len..self.pending_len + chunk_len].copy_from_slice(chunk);
            self.pending_len += chunk_len;
            input = rest;

            if self.pending_len == block_size {
                self.state.xor_block(&self.pending[..block_size]);
                self.state.permute();
                self.pending_len = 0;
                log::trace!("{}: absorbed one block", self.mode);
            }
        }
    }

    /// Applies the SHA-3 padding to the pending bytes, then squeezes `output.len()` bytes.
    pub(crate) fn pad_and_squeeze(&mut self, output: &mut [u8]) {
        debug_assert_eq!(self.phase, Phase::Absorbing);
        let block_size = self.block_size();

        // pad10*1 with the SHA-3 domain bits. If the pending bytes fill all but
        // one byte of the block, both markers land in the last byte (0x86).
        let mut block = [0u8; MAX_BLOCK_SIZE];
        block[..self.pending_len].copy_from_slice(&self.pending[..self.pending_len]);
        block[self.pending_len] = DOMAIN_SHA3;
        block[block_size - 1] |= PAD_LAST;
        self.state.xor_block(&block[..block_size]);
        self.state.permute();
        block.zeroize();
        self.pending.zeroize();
        self.pending_len = 0;

        // In-scope modes never need more than one block of output.
        for (i, chunk) in output.chunks_mut(block_size).enumerate() {
            if i > 0 {
                self.state.permute();
            }
            chunk.copy_from_slice(&self.state.as_bytes()[..chunk.len()]);
        }
        self.phase = Phase::Squeezed;
        log::trace!("{}: squeezed {} bytes", self.mode, output.len());
    }

    /// Computes the digest of `input` into `output`, whose length must be the mode's digest length.
    pub(crate) fn digest_into(mode: Mode, input: &[u8], output: &mut [u8]) {
        debug_assert_eq!(output.len(), mode.digest_len());
        let mut sponge = Self::new(mode);
        sponge.absorb(input);
        sponge.pad_and_squeeze(output);
    }
}

/// Wiping a sponge also retires it: a wiped instance fails every later call
/// with [`Sha3Error::InvalidState`].
impl Zeroize for Sha3 {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.pending.zeroize();
        self.pending_len.zeroize();
        self.phase = Phase::Squeezed;
    }
}

impl Drop for Sha3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Sha3 {}

impl std::io::Write for Sha3 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ::core::fmt::Debug for Sha3 {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        // Ensure that the state isn't accidentally logged
        write!(f, "Sha3 {{ mode: {}, phase: {:?} }}", self.mode, self.phase)
    }
}

/// One-shot hash: writes the digest of `input` under `mode` into the first
/// `mode.digest_len()` bytes of `output`.
///
/// Fails with [`Sha3Error::InvalidArgument`] if `output` is shorter than the digest,
/// before any work is done.
pub fn hash(mode: Mode, input: &[u8], output: &mut [u8]) -> Sha3Result<()> {
    if output.len() < mode.digest_len() {
        return Err(Sha3Error::InvalidArgument);
    }
    let mut sponge = Sha3::new(mode);
    sponge.update(input)?;
    sponge.finalize_into(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_block() {
        // Drive the padding directly: with `block_size - 1` pending bytes the
        // two markers share the final byte.
        let mode = Mode::Sha3_256;
        let block_size = mode.block_size();

        let mut merged = Sha3::new(mode);
        merged.absorb(&vec![0u8; block_size - 1]);
        let mut manual = KeccakState::default();
        let mut block = vec![0u8; block_size];
        block[block_size - 1] = 0x86;
        manual.xor_block(&block);
        manual.permute();
        let mut out = [0u8; 32];
        merged.pad_and_squeeze(&mut out);
        assert_eq!(&out[..], &manual.as_bytes()[..32]);

        // an empty message pads to 0x06 00 .. 00 80
        let mut empty = Sha3::new(mode);
        let mut manual = KeccakState::default();
        let mut block = vec![0u8; block_size];
        block[0] = 0x06;
        block[block_size - 1] = 0x80;
        manual.xor_block(&block);
        manual.permute();
        empty.pad_and_squeeze(&mut out);
        assert_eq!(&out[..], &manual.as_bytes()[..32]);
    }

    #[test]
    fn test_pending_stays_below_block_size() {
        for mode in Mode::ALL {
            let mut sponge = Sha3::new(mode);
            for len in [0, 1, mode.block_size() - 1, mode.block_size(), 3 * mode.block_size() + 5] {
                sponge.update(&vec![0xa5; len]).unwrap();
                assert!(sponge.pending_len < mode.block_size());
            }
        }
    }

    #[test]
    fn test_squeeze_longer_than_rate() {
        // Not reachable through the public API, but the squeeze loop must
        // permute between blocks.
        let mode = Mode::Sha3_512;
        let mut long = Sha3::new(mode);
        let mut output = vec![0u8; 2 * mode.block_size() + 3];
        long.pad_and_squeeze(&mut output);

        let mut short = Sha3::new(mode);
        let mut first = vec![0u8; mode.block_size()];
        short.pad_and_squeeze(&mut first);
        assert_eq!(&output[..mode.block_size()], &first[..]);
        assert_ne!(
            &output[mode.block_size()..2 * mode.block_size()],
            &first[..]
        );
    }

    #[test]
    fn test_debug_hides_state() {
        let mut sponge = Sha3::new(Mode::Sha3_384);
        sponge.update(b"secret").unwrap();
        assert_eq!(
            format!("{:?}", sponge),
            "Sha3 { mode: SHA3-384, phase: Absorbing }"
        );
    }

    #[test]
    fn test_zeroize_retires_sponge() {
        let mut sponge = Sha3::new(Mode::Sha3_256);
        sponge.update(&[0xa5; 200]).unwrap();
        sponge.zeroize();
        assert!(sponge.state.lanes().iter().all(|&lane| lane == 0));
        assert!(sponge.pending.iter().all(|&b| b == 0));
        assert_eq!(sponge.pending_len, 0);
        assert!(sponge.is_finalized());
        assert_eq!(sponge.update(b"more"), Err(Sha3Error::InvalidState));
        let mut output = [0xaau8; 32];
        assert_eq!(
            sponge.finalize_into(&mut output),
            Err(Sha3Error::InvalidState)
        );
        assert!(output.iter().all(|&b| b == 0xaa));
    }

    #[test]
    fn test_with_bits() {
        assert_eq!(Sha3::with_bits(224).unwrap().mode(), Mode::Sha3_224);
        assert!(matches!(
            Sha3::with_bits(160),
            Err(Sha3Error::InvalidMode(_))
        ));
    }
}
