// Copyright 2026 messner75
//
// IEEE-754 classification and magnitude decomposition: splits a finite value
// into a rounded mantissa and a power-of-ten exponent.

use crate::prefix::MAX_EXPONENT;
use crate::Error;

// ---------------------------------------------------------------------------------------------
// IEEE-754 double precision:
//
// - bit 63: sign, 0 = positive, 1 = negative
// - bits 62-52: exponent (11 bits),
// - bits 51-00: fraction (52 bits)

const FRACTION_MASK: u64 = (1 << 52) - 1;
const EXPONENT_MASK: u64 = 0x7ff << 52;
const SIGN_MASK: u64 = 1 << 63;

/// Encoding class of an IEEE-754 double-precision value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    Nan,    // not a number
    Inf,    // +infinity or -infinity
    Zero,   // zero, either sign
    Digits  // non-zero finite number
}

/// Classifies `value` from its binary encoding.
pub(crate) fn encoding(value: f64) -> Encoding {
    let bits = value.to_bits();
    if bits & !SIGN_MASK == 0 {
        Encoding::Zero
    } else if bits & EXPONENT_MASK != EXPONENT_MASK {
        Encoding::Digits
    } else if bits & FRACTION_MASK == 0 {
        Encoding::Inf
    } else {
        Encoding::Nan
    }
}

// ---------------------------------------------------------------------------------------------

/// Magnitude of a non-zero finite value, rounded to a fixed number of fractional digits:
/// `|value| = (scaled / 10^fracs) * 10^exponent`, so `scaled` holds the mantissa digits
/// as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decomposed {
    pub scaled: u64,
    pub exponent: i32,
}

/// Maximum exponent correction passes; one is enough for a rounding carry,
/// a second absorbs an off-by-one `log10` estimate.
const MAX_NORM_STEPS: u32 = 4;

/// Decomposes the non-zero finite `value` into [Decomposed], with the mantissa rounded
/// half away from zero to `fracs` fractional digits.
///
/// `step` is the exponent granularity: 3 keeps the exponent on the SI-prefix grid with
/// the mantissa in `[1, 1000)`, 1 is plain scientific notation with the mantissa in
/// `[1, 10)`. A mantissa that rounds out of its range re-normalizes with the exponent
/// shifted by one step before it is rounded again.
///
/// Fails with [Error::ValueRange] when the normalized exponent leaves the supported
/// prefix table (`-24..=24`).
pub(crate) fn decompose(value: f64, fracs: u32, step: i32) -> Result<Decomposed, Error> {
    debug_assert!(step == 1 || step == 3);
    let abs = value.abs();
    let lower = 10_u64.pow(fracs);
    let upper = lower * if step == 1 { 10 } else { 1000 };

    let first = abs.log10().floor() as i32;
    let mut exponent = if step == 3 { 3 * first.div_euclid(3) } else { first };

    // far outside the prefix table; bail out before the scaling itself can overflow
    if exponent.abs() > MAX_EXPONENT + step {
        return Err(Error::ValueRange);
    }

    let mut scaled = rescale(abs, fracs as i32 - exponent);
    let mut steps = 0;
    while scaled < lower || scaled >= upper {
        exponent += if scaled >= upper { step } else { -step };
        scaled = rescale(abs, fracs as i32 - exponent);
        steps += 1;
        if steps >= MAX_NORM_STEPS {
            return Err(Error::General);
        }
    }
    if exponent.abs() > MAX_EXPONENT {
        return Err(Error::ValueRange);
    }
    Ok(Decomposed { scaled, exponent })
}

/// `abs` * 10^`e`, rounded half away from zero to an integer.
fn rescale(abs: f64, e: i32) -> u64 {
    let x = if e >= 0 { abs * pow10(e as u32) } else { abs / pow10(e.unsigned_abs()) };
    x.round() as u64
}

/// Positive power of ten; every power up to 10^22 is exact in an f64.
fn pow10(e: u32) -> f64 {
    const EXACT: [f64; 23] = [
        1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11,
        1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
    ];
    match EXACT.get(e as usize) {
        Some(&p) => p,
        None => 10_f64.powi(e as i32),
    }
}
