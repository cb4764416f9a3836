use core::fmt::Display;
use core::str::FromStr;

use crate::errors::{Sha3Error, Sha3Result};

use super::keccak::STATE_BYTES;

/// The largest rate among the supported modes, in bytes (SHA3-224).
pub const MAX_BLOCK_SIZE: usize = 144;

/// The largest digest among the supported modes, in bytes (SHA3-512).
pub const MAX_DIGEST_LEN: usize = 64;

/// The four fixed-output SHA-3 functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Sponge parameters of a mode.
#[derive(Clone, Copy)]
struct Params {
    /// Rate, in bits.
    rate: usize,
    /// Digest length, in bytes.
    digest_len: usize,
}

/// Indexed by `Mode as usize`.
const PARAMS: [Params; 4] = [
    Params {
        rate: 1152,
        digest_len: 28,
    },
    Params {
        rate: 1088,
        digest_len: 32,
    },
    Params {
        rate: 832,
        digest_len: 48,
    },
    Params {
        rate: 576,
        digest_len: 64,
    },
];

impl Mode {
    /// All supported modes, from the shortest digest to the longest.
    pub const ALL: [Mode; 4] = [Mode::Sha3_224, Mode::Sha3_256, Mode::Sha3_384, Mode::Sha3_512];

    #[inline(always)]
    const fn params(self) -> Params {
        PARAMS[self as usize]
    }

    /// Bits absorbed or squeezed per permutation call.
    pub const fn rate(self) -> usize {
        self.params().rate
    }

    /// Bits never exposed to input or output. `rate() + capacity() == 1600`.
    pub const fn capacity(self) -> usize {
        STATE_BYTES * 8 - self.rate()
    }

    /// The rate in bytes: the unit of input consumed per permutation call.
    pub const fn block_size(self) -> usize {
        self.rate() / 8
    }

    /// Output size, in bytes.
    pub const fn digest_len(self) -> usize {
        self.params().digest_len
    }

    /// Output size, in bits. This is the number in the function's name.
    pub const fn bits(self) -> usize {
        self.digest_len() * 8
    }
}

impl TryFrom<usize> for Mode {
    type Error = Sha3Error;

    /// Select a mode from its output size in bits.
    fn try_from(bits: usize) -> Sha3Result<Self> {
        match bits {
            224 => Ok(Mode::Sha3_224),
            256 => Ok(Mode::Sha3_256),
            384 => Ok(Mode::Sha3_384),
            512 => Ok(Mode::Sha3_512),
            _ => Err(Sha3Error::InvalidMode(bits.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = Sha3Error;

    /// Accepts `"SHA3-256"`, `"sha3_256"`, `"sha3256"` and the bare `"256"`, case-insensitively.
    fn from_str(s: &str) -> Sha3Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let bits = lowered
            .strip_prefix("sha3")
            .map(|rest| rest.trim_start_matches(['-', '_']))
            .unwrap_or(lowered.as_str());
        bits.parse::<usize>()
            .ok()
            .and_then(|bits| Mode::try_from(bits).ok())
            .ok_or_else(|| Sha3Error::InvalidMode(s.to_string()))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SHA3-{}", self.bits())
    }
}
