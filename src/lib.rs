#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod int128;
pub mod java_random;
pub mod lcg;

pub use error::*;
pub use int128::*;
pub use java_random::*;
pub use rand_core::{RngCore, SeedableRng};

// Constants of the 48-bit LCG used by java.util.Random,
// also known from the POSIX drand48 family.

/// LCG multiplier.
pub const JAVA_MULTIPLIER: u64 = 0x5deece66d;
/// LCG increment.
pub const JAVA_ADDEND: u64 = 0xb;
/// Width of the LCG state in bits.
pub const JAVA_STATE_BITS: u32 = 48;
/// Mask of the LCG modulus 2**48.
pub const JAVA_MASK: u64 = lcg::modulus_mask(JAVA_STATE_BITS);

// 64-bit LCG multiplier from Steele, G. and Vigna, S.,
// Computationally Easy, Spectrally Good Multipliers for
// Congruential Pseudorandom Number Generators (2020).
// Used to drive test sweeps.
pub const LCG_M64_1: u64 = 0xd1342543de82ef95;
