//! HMAC over the SHA-3 sponge.
//!
//! `HMAC(K, m) = H((K' ^ opad) || H((K' ^ ipad) || m))`, where `K'` is the key,
//! first replaced by its digest if it is longer than the block size of `H`,
//! then zero-padded to the block size.
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Sha3Error, Sha3Result};
use crate::hash::{Mode, Sha3, MAX_BLOCK_SIZE, MAX_DIGEST_LEN};

/// Byte XORed into the key to obtain the inner pad.
const IPAD: u8 = 0x36;
/// Byte XORed into the key to obtain the outer pad.
const OPAD: u8 = 0x5c;

/// A streaming HMAC-SHA3 instance.
///
/// The inner hash is committed to the key as soon as the instance is created;
/// message bytes are then fed with [`Hmac::update`], and the tag is obtained with
/// [`Hmac::finalize_into`]. An instance produces exactly one tag.
///
/// ```
/// use sha3_hmac::{hmac, Hmac, Mode};
///
/// let mut mac = Hmac::new(Mode::Sha3_256, b"key");
/// mac.update(b"The quick brown fox ").unwrap();
/// mac.update(b"jumps over the lazy dog").unwrap();
/// let tag = mac.finalize().unwrap();
///
/// let mut expected = [0u8; 32];
/// hmac(Mode::Sha3_256, b"The quick brown fox jumps over the lazy dog", b"key", &mut expected).unwrap();
/// assert_eq!(tag, expected);
/// ```
#[derive(Clone)]
pub struct Hmac {
    ipad: [u8; MAX_BLOCK_SIZE],
    opad: [u8; MAX_BLOCK_SIZE],
    inner: Sha3,
    mode: Mode,
}

impl Hmac {
    /// Derives the key pads from `key` and absorbs the inner pad.
    ///
    /// Keys longer than the block size of `mode` are hashed first; shorter keys are zero-padded.
    pub fn new(mode: Mode, key: &[u8]) -> Self {
        let block_size = mode.block_size();
        let digest_len = mode.digest_len();

        let mut hashed_key = [0u8; MAX_DIGEST_LEN];
        let key = if key.len() > block_size {
            log::debug!(
                "HMAC-{}: key of {} bytes exceeds the block size of {} bytes, hashing it",
                mode,
                key.len(),
                block_size
            );
            Sha3::digest_into(mode, key, &mut hashed_key[..digest_len]);
            &hashed_key[..digest_len]
        } else {
            key
        };

        let mut ipad = [0u8; MAX_BLOCK_SIZE];
        let mut opad = [0u8; MAX_BLOCK_SIZE];
        ipad[..key.len()].copy_from_slice(key);
        opad[..key.len()].copy_from_slice(key);
        ipad[..block_size].iter_mut().for_each(|b| *b ^= IPAD);
        opad[..block_size].iter_mut().for_each(|b| *b ^= OPAD);
        hashed_key.zeroize();

        let mut inner = Sha3::new(mode);
        inner.absorb(&ipad[..block_size]);
        Self {
            ipad,
            opad,
            inner,
            mode,
        }
    }

    /// Like [`Hmac::new`], selecting the mode from its output size in bits.
    pub fn with_bits(bits: usize, key: &[u8]) -> Sha3Result<Self> {
        Ok(Self::new(Mode::try_from(bits)?, key))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bytes written by [`Hmac::finalize_into`].
    pub fn mac_len(&self) -> usize {
        self.mode.digest_len()
    }

    /// Whether the tag has already been produced.
    pub fn is_finalized(&self) -> bool {
        self.inner.is_finalized()
    }

    /// Feeds `input` to the inner hash.
    ///
    /// Fails with [`Sha3Error::InvalidState`] once the tag has been produced.
    pub fn update(&mut self, input: &[u8]) -> Sha3Result<()> {
        self.inner.update(input)
    }

    /// Closes the inner hash and writes the tag in the first [`Hmac::mac_len`] bytes of `output`.
    ///
    /// Fails with [`Sha3Error::InvalidState`] if the tag was already produced,
    /// and with [`Sha3Error::NullOutput`] if `output` is shorter than the tag.
    /// On failure `output` is left untouched.
    pub fn finalize_into(&mut self, output: &mut [u8]) -> Sha3Result<()> {
        let block_size = self.mode.block_size();
        let digest_len = self.mode.digest_len();
        if output.len() < digest_len && !self.inner.is_finalized() {
            return Err(Sha3Error::NullOutput);
        }

        let mut outer_input = [0u8; MAX_BLOCK_SIZE + MAX_DIGEST_LEN];
        self.inner
            .finalize_into(&mut outer_input[block_size..block_size + digest_len])?;
        outer_input[..block_size].copy_from_slice(&self.opad[..block_size]);
        Sha3::digest_into(
            self.mode,
            &outer_input[..block_size + digest_len],
            &mut output[..digest_len],
        );
        outer_input.zeroize();
        Ok(())
    }

    /// Like [`Hmac::finalize_into`], returning the tag in a new vector.
    pub fn finalize(&mut self) -> Sha3Result<Vec<u8>> {
        let mut tag = vec![0u8; self.mac_len()];
        self.finalize_into(&mut tag)?;
        Ok(tag)
    }

    /// Finalizes and compares the tag with `expected`.
    ///
    /// A tag of the wrong length never matches. The comparison is not constant-time.
    pub fn verify(&mut self, expected: &[u8]) -> Sha3Result<bool> {
        let mut tag = [0u8; MAX_DIGEST_LEN];
        let tag_len = self.mac_len();
        self.finalize_into(&mut tag[..tag_len])?;
        let matches = &tag[..tag_len] == expected;
        tag.zeroize();
        Ok(matches)
    }
}

/// Wiping the key pads also retires the instance, so no tag is ever computed
/// from wiped pads.
impl Zeroize for Hmac {
    fn zeroize(&mut self) {
        self.ipad.zeroize();
        self.opad.zeroize();
        self.inner.zeroize();
    }
}

impl Drop for Hmac {
    fn drop(&mut self) {
        self.ipad.zeroize();
        self.opad.zeroize();
    }
}

impl ZeroizeOnDrop for Hmac {}

impl std::io::Write for Hmac {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ::core::fmt::Debug for Hmac {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        // Ensure that the key pads aren't accidentally logged
        write!(
            f,
            "Hmac {{ mode: {}, finalized: {} }}",
            self.mode,
            self.is_finalized()
        )
    }
}

/// One-shot HMAC: writes the tag of `input` under `key` into the first
/// `mode.digest_len()` bytes of `output`.
///
/// Fails with [`Sha3Error::InvalidArgument`] if `output` is shorter than the tag,
/// before any work is done.
pub fn hmac(mode: Mode, input: &[u8], key: &[u8], output: &mut [u8]) -> Sha3Result<()> {
    if output.len() < mode.digest_len() {
        return Err(Sha3Error::InvalidArgument);
    }
    let mut mac = Hmac::new(mode, key);
    mac.update(input)?;
    mac.finalize_into(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads() {
        let mode = Mode::Sha3_512;
        let mac = Hmac::new(mode, b"\x01\x02");
        assert_eq!(&mac.ipad[..3], &[0x37, 0x34, 0x36]);
        assert_eq!(&mac.opad[..3], &[0x5d, 0x5e, 0x5c]);
        assert!(mac.ipad[2..mode.block_size()].iter().all(|&b| b == IPAD));
        assert!(mac.opad[2..mode.block_size()].iter().all(|&b| b == OPAD));
        // bytes past the block size are never used
        assert!(mac.ipad[mode.block_size()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_key_is_hashed_into_pads() {
        for mode in Mode::ALL {
            let key = vec![0x42u8; mode.block_size() + 1];
            let mac = Hmac::new(mode, &key);
            let hashed = {
                let mut sponge = Sha3::new(mode);
                sponge.update(&key).unwrap();
                sponge.finalize().unwrap()
            };
            for (i, &b) in mac.ipad[..mode.block_size()].iter().enumerate() {
                let key_byte = hashed.get(i).copied().unwrap_or(0);
                assert_eq!(b, key_byte ^ IPAD);
            }
        }
    }

    #[test]
    fn test_block_size_key_is_used_verbatim() {
        for mode in Mode::ALL {
            let key = vec![0x42u8; mode.block_size()];
            let mac = Hmac::new(mode, &key);
            assert!(mac.opad[..mode.block_size()]
                .iter()
                .all(|&b| b == 0x42 ^ OPAD));
        }
    }

    #[test]
    fn test_zeroize_retires_mac() {
        for mode in Mode::ALL {
            let mut mac = Hmac::new(mode, b"key");
            mac.update(b"message").unwrap();
            mac.zeroize();
            assert!(mac.ipad.iter().chain(&mac.opad).all(|&b| b == 0));
            assert!(mac.is_finalized());
            assert_eq!(mac.update(b"more"), Err(Sha3Error::InvalidState));
            assert_eq!(mac.finalize(), Err(Sha3Error::InvalidState));
            assert_eq!(mac.verify(&[0u8; MAX_DIGEST_LEN]), Err(Sha3Error::InvalidState));
        }
    }

    #[test]
    fn test_debug_hides_key() {
        let mac = Hmac::new(Mode::Sha3_224, b"secret");
        assert_eq!(
            format!("{:?}", mac),
            "Hmac { mode: SHA3-224, finalized: false }"
        );
    }
}
