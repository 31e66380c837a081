use wrapping_arithmetic::wrappit;

// Utility functions for LCGs (linear congruential generators)
// with a power-of-two modulus of at most 2**64.
// The modulus is given as a bit mask, `mask = modulus - 1`.

/// Returns the bit mask of a modulus of 2**bits, for bits in 1..=64.
#[inline]
pub const fn modulus_mask(bits: u32) -> u64 {
    if bits >= 64 { u64::MAX } else { (1 << bits) - 1 }
}

/// LCG iteration is state <- (state * m + p) & mask.
/// Returns the (m, p) pair that iterates by n steps at once.
/// Assumes (m, p) is full period.
#[wrappit]
pub fn get_jump(m: u64, p: u64, n: u64, mask: u64) -> (u64, u64) {
    // Algorithm from Brown, F. B., "Random Number Generation with Arbitrary Stride",
    // Transactions of the American Nuclear Society, 1994.
    let mut unit_m = m & mask;
    let mut unit_p = p & mask;
    let mut jump_m: u64 = 1;
    let mut jump_p: u64 = 0;
    let mut delta = n & mask;

    while delta > 0 {
        if delta & 1 == 1 {
            jump_m = (jump_m * unit_m) & mask;
            jump_p = (jump_p * unit_m + unit_p) & mask;
        }
        unit_p = ((unit_m + 1) * unit_p) & mask;
        unit_m = (unit_m * unit_m) & mask;
        delta >>= 1;
    }
    (jump_m, jump_p)
}

/// LCG iteration is state <- (state * m + p) & mask.
/// Returns the number of iterations it takes to get from origin to state.
/// Assumes (m, p) is full period.
#[wrappit]
pub fn get_iterations(m: u64, p: u64, origin: u64, state: u64, mask: u64) -> u64 {
    let mut jump_m = m & mask;
    let mut jump_p = p & mask;
    let mut ordinal: u64 = 0;
    let mut bit: u64 = 1;
    let mut address = origin & mask;
    let state = state & mask;

    while address != state {
        if (bit & address) != (bit & state) {
            address = (address * jump_m + jump_p) & mask;
            ordinal = ordinal + bit;
        }
        jump_p = ((jump_m + 1) * jump_p) & mask;
        jump_m = (jump_m * jump_m) & mask;
        bit <<= 1;
    }
    ordinal
}

/// LCG iteration is state <- (state * m + p) & mask.
/// Returns state after the given number of iterations from origin.
/// Assumes (m, p) is full period.
pub fn get_state(m: u64, p: u64, origin: u64, iterations: u64, mask: u64) -> u64 {
    let (jump_m, jump_p) = get_jump(m, p, iterations, mask);
    origin.wrapping_mul(jump_m).wrapping_add(jump_p) & mask
}
