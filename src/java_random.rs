use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Error;
use crate::{lcg, JAVA_ADDEND, JAVA_MASK, JAVA_MULTIPLIER, JAVA_STATE_BITS};

// JavaRandom reproduces java.util.Random bit for bit:
// -48-bit LCG with multiplier 0x5deece66d and increment 0xb
// -outputs are the high bits of the state
// -derived distributions use the same draws and formulas as the JDK,
//  so seeded sequences match any conforming reimplementation
// -not cryptographically secure

/// Legacy 48-bit LCG generator, compatible with `java.util.Random`.
///
/// A generator is not synchronized. The cached Gaussian spare belongs to the
/// instance, so callers sharing one generator across threads must serialize
/// access to keep the sequence deterministic.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq)]
pub struct JavaRandom {
    /// LCG state, 48 bits.
    seed: u64,
    /// Second deviate of the last polar transform, not yet returned.
    next_gaussian: Option<f64>,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for JavaRandom {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "JavaRandom {{}}")
    }
}

#[inline] fn scramble(seed: u64) -> u64 {
    (seed ^ JAVA_MULTIPLIER) & JAVA_MASK
}

impl JavaRandom {

    /// Creates a new generator from a seed. Only the low 48 bits of the seed matter.
    /// A Java `long` seed can be passed as `seed as u64`.
    pub fn new(seed: u64) -> Self {
        JavaRandom { seed: scramble(seed), next_gaussian: None }
    }

    /// Reinitializes the state from a seed and discards any cached Gaussian spare.
    pub fn set_seed(&mut self, seed: u64) {
        trace!(seed, "reseeding JavaRandom");
        self.seed = scramble(seed);
        self.next_gaussian = None;
    }

    /// Advances to the next state.
    #[wrappit] #[inline]
    fn step(&mut self) {
        self.seed = (self.seed * JAVA_MULTIPLIER + JAVA_ADDEND) & JAVA_MASK;
    }

    /// Advances the state and returns its top `bits` bits, for bits in 1..=32.
    /// With 32 bits the result covers the full `i32` range.
    #[inline]
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!((1 ..= 32).contains(&bits));
        self.step();
        (self.seed >> (JAVA_STATE_BITS - bits)) as i32
    }

    /// Uniform `i32` over the full range.
    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// Uniform `i32` in `0 .. bound`. Fails if bound is not positive,
    /// in which case the state does not advance.
    pub fn next_int_bounded(&mut self, bound: i32) -> Result<i32, Error> {
        if bound <= 0 {
            debug!(bound, "JavaRandom bound must be positive");
            return Err(Error::NonPositiveBound(bound as i64));
        }

        if bound & (bound - 1) == 0 {
            // Power of two: take the high bits of a single draw.
            return Ok(((bound as i64 * self.next_bits(31) as i64) >> 31) as i32);
        }

        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            // Draws from the last partial block of `bound` values overflow here.
            if (bits - value).checked_add(bound - 1).is_some() {
                return Ok(value);
            }
            debug!(bits, bound, "JavaRandom rejected draw");
        }
    }

    /// Uniform `i64` from two draws. The low word is added as a signed value.
    #[wrappit] #[inline]
    pub fn next_long(&mut self) -> i64 {
        ((self.next_bits(32) as i64) << 32) + self.next_bits(32) as i64
    }

    #[inline]
    pub fn next_boolean(&mut self) -> bool {
        self.next_bits(1) != 0
    }

    /// Uniform `f32` in [0, 1) with 24 bits of precision.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1 << 24) as f32
    }

    /// Uniform `f64` in [0, 1) with 53 bits of precision.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let high = (self.next_bits(26) as i64) << 27;
        let low = self.next_bits(27) as i64;
        (high + low) as f64 / (1i64 << 53) as f64
    }

    /// Standard normal deviate from the polar method of Marsaglia.
    /// Each accepted pair yields two deviates: the second is cached and returned
    /// by the next call without advancing the state.
    #[cfg(feature = "std")]
    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(spare) = self.next_gaussian.take() {
            return spare;
        }
        loop {
            let v1 = 2.0 * self.next_double() - 1.0;
            let v2 = 2.0 * self.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.next_gaussian = Some(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }

    /// Fills the slice with random bytes. Each `next_int` draw supplies up to 4 bytes,
    /// least significant first; a trailing partial draw discards its unused bytes.
    pub fn next_bytes(&mut self, bytes: &mut [u8]) {
        for chunk in bytes.chunks_mut(4) {
            let mut x = self.next_int();
            for byte in chunk {
                *byte = x as u8;
                x >>= 8;
            }
        }
    }

    /// Draws an integer: types of up to 32 bits come from `next_int`,
    /// wider types from `next_long`, narrowed or sign extended with `as`.
    #[inline]
    pub fn next<T: RandomInteger>(&mut self) -> T {
        T::draw(self)
    }

    /// Draws a real in [0, 1): `f32` from `next_float`, `f64` from `next_double`.
    #[inline]
    pub fn next_real<T: RandomReal>(&mut self) -> T {
        T::draw(self)
    }

    /// Jumps forward (if steps > 0) or backward (if steps < 0) or does nothing (if steps = 0).
    /// The state wraps around with period 2**48. The cached Gaussian spare is kept.
    pub fn jump(&mut self, steps: i64) {
        trace!(steps, "jumping JavaRandom");
        self.seed = lcg::get_state(JAVA_MULTIPLIER, JAVA_ADDEND, self.seed, steps as u64, JAVA_MASK);
    }

    /// Returns the number of steps in 0 .. 2**48 that takes this generator's state to other's.
    pub fn distance(&self, other: &JavaRandom) -> u64 {
        lcg::get_iterations(JAVA_MULTIPLIER, JAVA_ADDEND, self.seed, other.seed, JAVA_MASK)
    }
}

impl Default for JavaRandom {
    /// Seed 0.
    fn default() -> Self {
        JavaRandom::new(0)
    }
}

/// Integer types that [`JavaRandom::next`] can produce.
pub trait RandomInteger: Sized {
    fn draw(rng: &mut JavaRandom) -> Self;
}

macro_rules! impl_random_integer {
    ($($t:ty),*) => {
        $(
            impl RandomInteger for $t {
                #[inline]
                fn draw(rng: &mut JavaRandom) -> Self {
                    if core::mem::size_of::<$t>() <= 4 {
                        rng.next_int() as $t
                    } else {
                        rng.next_long() as $t
                    }
                }
            }
        )*
    };
}

impl_random_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floating point types that [`JavaRandom::next_real`] can produce.
pub trait RandomReal: Sized {
    fn draw(rng: &mut JavaRandom) -> Self;
}

impl RandomReal for f32 {
    #[inline]
    fn draw(rng: &mut JavaRandom) -> Self {
        rng.next_float()
    }
}

impl RandomReal for f64 {
    #[inline]
    fn draw(rng: &mut JavaRandom) -> Self {
        rng.next_double()
    }
}

use super::{RngCore, SeedableRng};

impl RngCore for JavaRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_int() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.next_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl SeedableRng for JavaRandom {
    type Seed = [u8; 8];

    /// Creates a new generator from a little-endian 64-bit seed.
    fn from_seed(seed: Self::Seed) -> Self {
        JavaRandom::new(u64::from_le_bytes(seed))
    }

    /// Same as `JavaRandom::new`.
    fn seed_from_u64(state: u64) -> Self {
        JavaRandom::new(state)
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    #[test] pub fn run_tests() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(LCG_M64_1).wrapping_add(0xffff); r };

        for _ in 0 .. 1<<10 {
            let seed = rnd();
            let mut rng1 = JavaRandom::new(seed);
            let mut rng2 = JavaRandom::default();
            rng2.set_seed(seed);
            assert_eq!(0, rng1.distance(&rng2));

            // Bits above 48 do not matter.
            let mut rng3 = JavaRandom::new(seed ^ (rnd() << 48));
            assert_eq!(rng1.clone().next_long(), rng3.next_long());

            let n = 1 + (rnd() & 0x3ff);
            for _ in 0 .. n { rng1.next_int(); }
            assert_eq!(n, rng2.distance(&rng1));
            rng2.jump(n as i64);
            assert_eq!(rng1.next_int(), rng2.next_int());
            rng1.jump(-(n as i64) - 1);
            assert_eq!(JAVA_MASK - n, rng2.distance(&rng1));

            let bound = (rnd() >> 34) as i32 + 1;
            let x = rng1.next_int_bounded(bound).unwrap();
            assert!(0 <= x && x < bound);
            let x = rng1.next_float();
            assert!((0.0 .. 1.0).contains(&x));
            let x = rng1.next_double();
            assert!((0.0 .. 1.0).contains(&x));
        }
    }

    #[test] pub fn seed_42_ints() {
        let mut rng = JavaRandom::new(42);
        let expected = [-1170105035, 234785527, -1360544799, 205897768, 1325939940];
        for x in expected {
            assert_eq!(x, rng.next_int());
        }
    }

    #[test] pub fn seed_42_bounded() {
        let mut rng = JavaRandom::new(42);
        for x in [30, 63, 48, 84, 70, 25, 5, 18, 19, 93] {
            assert_eq!(x, rng.next_int_bounded(100).unwrap());
        }
        let mut rng = JavaRandom::new(42);
        for x in [11, 0, 10, 0, 4, 15, 4, 11] {
            assert_eq!(x, rng.next_int_bounded(16).unwrap());
        }
        // About half of the draws are rejected with this bound.
        let mut rng = JavaRandom::new(42);
        for x in [117392763, 102948884, 662969970, 595021505, 196118093] {
            assert_eq!(x, rng.next_int_bounded((1 << 30) + 1).unwrap());
        }
    }

    #[test] pub fn seed_42_other_types() {
        let mut rng = JavaRandom::new(42);
        for x in [-5025562857975149833i64, -5843495416241995736, 5694868678511409995] {
            assert_eq!(x, rng.next_long());
        }
        let mut rng = JavaRandom::new(42);
        for x in [0.7275636800328681, 0.6832234717598454, 0.30871945533265976] {
            assert_eq!(x, rng.next_double());
        }
        let mut rng = JavaRandom::new(42);
        for x in [12206493, 917130, 11462587] {
            assert_eq!(x as f32 / 16777216.0, rng.next_float());
        }
        let mut rng = JavaRandom::new(42);
        for x in [true, false, true, false, false, true, false, true] {
            assert_eq!(x, rng.next_boolean());
        }
    }

    #[test] pub fn default_seed() {
        let mut rng = JavaRandom::default();
        for x in [-1155484576, -723955400, 1033096058] {
            assert_eq!(x, rng.next_int());
        }
    }

    #[test] pub fn gaussian() {
        let mut rng = JavaRandom::new(42);
        let mut reference = rng.clone();
        let first = rng.next_gaussian();
        let second = rng.next_gaussian();

        let (v1, v2, s) = loop {
            let v1 = 2.0 * reference.next_double() - 1.0;
            let v2 = 2.0 * reference.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 { break (v1, v2, s); }
        };
        let multiplier = (-2.0 * s.ln() / s).sqrt();
        assert_eq!(v1 * multiplier, first);
        assert_eq!(v2 * multiplier, second);
        // Returning the spare does not advance the state.
        assert_eq!(0, reference.distance(&rng));

        assert!((first - 1.1419053154730547).abs() < 1e-12);
        assert!((second - 0.919407948982788).abs() < 1e-12);
        assert!((rng.next_gaussian() + 0.9498666368908959).abs() < 1e-12);
        assert!((rng.next_gaussian() + 1.1069902863993377).abs() < 1e-12);
    }

    #[test] pub fn set_seed_clears_spare() {
        let mut rng = JavaRandom::new(42);
        let first = rng.next_gaussian();
        rng.set_seed(42);
        assert_eq!(first, rng.next_gaussian());

        // Jumping keeps the spare.
        let mut rng = JavaRandom::new(7);
        let mut other = rng.clone();
        rng.next_gaussian();
        other.next_gaussian();
        let spare = other.next_gaussian();
        rng.jump(100);
        assert_eq!(spare, rng.next_gaussian());
    }

    #[test] pub fn bounded_edge_cases() {
        let mut rng = JavaRandom::new(1);
        let fresh = rng.clone();
        assert_eq!(Err(Error::NonPositiveBound(0)), rng.next_int_bounded(0));
        assert_eq!(Err(Error::NonPositiveBound(-5)), rng.next_int_bounded(-5));
        assert_eq!(ErrorKind::InvalidArgument, rng.next_int_bounded(i32::MIN).unwrap_err().kind());
        assert_eq!(fresh, rng);

        for _ in 0 .. 1000 {
            assert_eq!(0, rng.next_int_bounded(1).unwrap());
            assert!((0 .. i32::MAX).contains(&rng.next_int_bounded(i32::MAX).unwrap()));
            assert!((0 .. 1 << 30).contains(&rng.next_int_bounded(1 << 30).unwrap()));
        }
    }

    #[test] pub fn ranges() {
        let mut rng = JavaRandom::new(123);
        let mut seen16 = [false; 16];
        let mut seen10 = [false; 10];
        for _ in 0 .. 10000 {
            let x = rng.next_float();
            assert!((0.0 .. 1.0).contains(&x));
            let x = rng.next_double();
            assert!((0.0 .. 1.0).contains(&x));
            let x = rng.next_int_bounded(16).unwrap();
            assert!((0 .. 16).contains(&x));
            seen16[x as usize] = true;
            let x = rng.next_int_bounded(10).unwrap();
            assert!((0 .. 10).contains(&x));
            seen10[x as usize] = true;
        }
        assert!(seen16.iter().all(|&x| x));
        assert!(seen10.iter().all(|&x| x));
    }

    #[test] pub fn determinism() {
        let mut rng1 = JavaRandom::new(0xdead_beef);
        let mut rng2 = JavaRandom::new(0xdead_beef);
        for i in 0 .. 1000 {
            match i % 7 {
                0 => assert_eq!(rng1.next_int(), rng2.next_int()),
                1 => assert_eq!(rng1.next_int_bounded(i + 1), rng2.next_int_bounded(i + 1)),
                2 => assert_eq!(rng1.next_long(), rng2.next_long()),
                3 => assert_eq!(rng1.next_boolean(), rng2.next_boolean()),
                4 => assert_eq!(rng1.next_float(), rng2.next_float()),
                5 => assert_eq!(rng1.next_double(), rng2.next_double()),
                _ => assert_eq!(rng1.next_gaussian(), rng2.next_gaussian()),
            }
        }
        assert_eq!(rng1, rng2);
    }

    #[test] pub fn bytes() {
        let mut rng = JavaRandom::new(42);
        let mut buffer = [0u8; 8];
        rng.next_bytes(&mut buffer);
        assert_eq!([53, 157, 65, 186, 247, 138, 254, 13], buffer);

        // A partial draw discards its remaining bytes.
        let mut rng1 = JavaRandom::new(42);
        let mut short = [0u8; 6];
        rng1.fill_bytes(&mut short);
        assert_eq!(buffer[0 .. 6], short);
        assert_eq!(rng.next_int(), rng1.next_int());

        let mut empty = [0u8; 0];
        let fresh = rng1.clone();
        rng1.next_bytes(&mut empty);
        assert_eq!(fresh, rng1);
    }

    #[test] pub fn generic_draws() {
        let mut rng = JavaRandom::new(42);
        let mut reference = rng.clone();
        assert_eq!(reference.next_int(), rng.next::<i32>());
        assert_eq!(reference.next_int() as u8, rng.next::<u8>());
        assert_eq!(reference.next_int() as u16, rng.next::<u16>());
        assert_eq!(reference.next_long() as u64, rng.next::<u64>());
        assert_eq!(reference.next_long() as i128, rng.next::<i128>());
        assert_eq!(reference.next_float(), rng.next_real::<f32>());
        assert_eq!(reference.next_double(), rng.next_real::<f64>());
    }

    #[test] pub fn rand_core_traits() {
        let mut rng = JavaRandom::seed_from_u64(42);
        let mut reference = JavaRandom::new(42);
        assert_eq!(reference.next_int() as u32, rng.next_u32());
        assert_eq!(reference.next_long() as u64, rng.next_u64());
        let mut buffer = [0u8; 5];
        let mut expected = [0u8; 5];
        rng.try_fill_bytes(&mut buffer).unwrap();
        reference.next_bytes(&mut expected);
        assert_eq!(expected, buffer);

        assert_eq!(JavaRandom::new(42), JavaRandom::from_seed(42u64.to_le_bytes()));
        assert_eq!("JavaRandom {}", format!("{:?}", rng));
    }
}
