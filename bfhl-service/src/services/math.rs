//! Pure numeric helpers behind the `fibonacci`, `prime`, `lcm` and `hcf` keys.

use num_bigint::BigUint;

/// Resource limit on requested Fibonacci terms.
///
/// Term k has about 0.21 * k decimal digits, so the full series stays around
/// 2.6 MB of JSON at this bound.
pub const MAX_FIBONACCI_TERMS: usize = 5_000;

/// Candidates below this are trial-divided; above it Miller-Rabin is used.
const TRIAL_DIVISION_LIMIT: u64 = 1 << 32;

/// Witnesses that make Miller-Rabin exact for every `u64`.
const MILLER_RABIN_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// First `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`, exact at any size.
///
/// Non-positive `n` yields an empty sequence. Returns `None` when `n` exceeds
/// [`MAX_FIBONACCI_TERMS`].
pub fn fibonacci(n: i64) -> Option<Vec<BigUint>> {
    let n = usize::try_from(n).unwrap_or(0);
    if n > MAX_FIBONACCI_TERMS {
        return None;
    }

    let mut series: Vec<BigUint> = Vec::with_capacity(n);
    for i in 0..n {
        let term = match i {
            0 => BigUint::from(0u32),
            1 => BigUint::from(1u32),
            _ => &series[i - 1] + &series[i - 2],
        };
        series.push(term);
    }

    Some(series)
}

/// Primality over the whole `u64` range.
///
/// Trial division up to and including the integer square root for small
/// candidates; deterministic Miller-Rabin (same answers, bounded work) above
/// `2^32`.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n < TRIAL_DIVISION_LIMIT {
        trial_division(n)
    } else {
        miller_rabin(n)
    }
}

fn trial_division(n: u64) -> bool {
    let mut divisor = 2;
    // divisor <= n / divisor avoids squaring past u64::MAX
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

// Requires n > 37.
fn miller_rabin(n: u64) -> bool {
    if n % 2 == 0 {
        return false;
    }
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for a in MILLER_RABIN_WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Primes from `values`, input order kept.
pub fn filter_primes(values: &[i128]) -> Vec<u64> {
    values
        .iter()
        .filter_map(|&v| u64::try_from(v).ok())
        .filter(|&v| is_prime(v))
        .collect()
}

/// Euclid with truncated remainder: `gcd(a, 0) = a`, `gcd(a, b) = gcd(b, a % b)`.
///
/// Signs follow the remainder, so mixed-sign input can give a negative result.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        // wrapping_rem: i128::MIN % -1 is 0, not a panic
        let r = a.wrapping_rem(b);
        a = b;
        b = r;
    }
    a
}

/// `|a * b| / gcd(a, b)`, with `lcm(0, 0) = 0`. `None` on overflow.
pub fn lcm(a: i128, b: i128) -> Option<i128> {
    let divisor = gcd(a, b);
    if divisor == 0 {
        return Some(0);
    }
    a.checked_mul(b)?.checked_abs()?.checked_div(divisor)
}

/// Left fold of [`gcd`]. `None` for an empty slice.
pub fn hcf_of(values: &[i128]) -> Option<i128> {
    values.iter().copied().reduce(gcd)
}

/// Left fold of [`lcm`]. `None` for an empty slice or on overflow.
pub fn lcm_of(values: &[i128]) -> Option<i128> {
    let (first, rest) = values.split_first()?;
    rest.iter().try_fold(*first, |acc, &v| lcm(acc, v))
}
