// Copyright 2026 messner75
//
// SI prefix lookup tables, exponents -24 (yocto) to +24 (yotta) in steps of 3.
// Micro is the ASCII 'u' so the output stays single-byte clean.

/// Exponent of the largest table entry (yotta); the table is symmetric down to yocto.
pub(crate) const MAX_EXPONENT: i32 = 24;

// indexed by exponent / 3 + 8
const LETTERS: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "u", "m",
    "",
    "k", "M", "G", "T", "P", "E", "Z", "Y",
];

const NAMES: [&str; 17] = [
    "yocto", "zepto", "atto", "femto", "pico", "nano", "micro", "milli",
    "",
    "kilo", "mega", "giga", "tera", "peta", "exa", "zetta", "yotta",
];

/// Single-letter prefix for `exponent`; empty for exponent 0.
pub(crate) fn letter(exponent: i32) -> &'static str {
    LETTERS[index(exponent)]
}

/// Full prefix name for `exponent`; empty for exponent 0.
pub(crate) fn name(exponent: i32) -> &'static str {
    NAMES[index(exponent)]
}

fn index(exponent: i32) -> usize {
    debug_assert!(exponent % 3 == 0 && exponent.abs() <= MAX_EXPONENT);
    (exponent / 3 + 8) as usize
}
