use std::io::Write;
use legacy_num::*;

// Writes an endless stream of JavaRandom output to stdout,
// for piping into statistical test suites such as PractRand:
//   legacy_num [seed] [bits] | RNG_test stdin32
// where bits selects next_bits(bits) per 32-bit word (default 32).

fn main() -> std::io::Result<()> {

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
    let bits = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(32).clamp(1, 32);

    let mut rnd = JavaRandom::new(seed);
    let mut stdout = std::io::stdout();

    let mut v: Vec<u8> = Vec::new();

    loop {
        // Narrower outputs are left aligned so the high bits stay meaningful.
        let z = (rnd.next_bits(bits) as u32) << (32 - bits);

        v.extend_from_slice(&z.to_le_bytes());

        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}
