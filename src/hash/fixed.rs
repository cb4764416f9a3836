//! Statically-sized SHA-3 hashers for the RustCrypto [`digest`] ecosystem.
//!
//! Each of [`Sha3_224`], [`Sha3_256`], [`Sha3_384`] and [`Sha3_512`] wraps a [`Sha3`] sponge
//! and implements [`Update`], [`FixedOutput`], [`FixedOutputReset`] and friends,
//! so that they can be used anywhere a [`digest::Digest`] is expected.
//!
//! ```
//! use digest::Digest;
//! use sha3_hmac::hash::fixed::Sha3_256;
//!
//! let mut hasher = Sha3_256::new();
//! Digest::update(&mut hasher, b"abc");
//! assert_eq!(
//!     hex::encode(hasher.finalize()),
//!     "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
//! );
//! ```
//!
//! Unlike [`Sha3`], these hashers cannot be misused: finalization consumes or resets them.

use digest::{
    typenum::{U104, U136, U144, U28, U32, U48, U64, U72},
    FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};

use super::mode::Mode;
use super::sponge::Sha3;

macro_rules! impl_fixed_sha3 {
    ($name:ident, $oneshot:ident, $mode:expr, $out:ty, $block:ty, $len:expr) => {
        #[doc = concat!("A ", stringify!($name), " hasher implementing the [`digest`] traits.")]
        #[derive(Clone, Debug)]
        pub struct $name(Sha3);

        impl $name {
            /// The mode this hasher runs.
            pub const MODE: Mode = $mode;
        }

        impl Default for $name {
            fn default() -> Self {
                Self(Sha3::new(Self::MODE))
            }
        }

        impl HashMarker for $name {}

        impl OutputSizeUser for $name {
            type OutputSize = $out;
        }

        impl digest::core_api::BlockSizeUser for $name {
            type BlockSize = $block;
        }

        impl Update for $name {
            fn update(&mut self, data: &[u8]) {
                self.0.absorb(data);
            }
        }

        impl FixedOutput for $name {
            fn finalize_into(mut self, out: &mut Output<Self>) {
                self.0.pad_and_squeeze(out);
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                self.0 = Sha3::new(Self::MODE);
            }
        }

        impl FixedOutputReset for $name {
            fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
                self.0.pad_and_squeeze(out);
                Reset::reset(self);
            }
        }

        #[doc = concat!("One-shot ", stringify!($name), " of `input`.")]
        pub fn $oneshot(input: &[u8]) -> [u8; $len] {
            let mut digest = [0u8; $len];
            Sha3::digest_into($mode, input, &mut digest);
            digest
        }
    };
}

impl_fixed_sha3!(Sha3_224, sha3_224, Mode::Sha3_224, U28, U144, 28);
impl_fixed_sha3!(Sha3_256, sha3_256, Mode::Sha3_256, U32, U136, 32);
impl_fixed_sha3!(Sha3_384, sha3_384, Mode::Sha3_384, U48, U104, 48);
impl_fixed_sha3!(Sha3_512, sha3_512, Mode::Sha3_512, U64, U72, 64);
