// Copyright 2026 messner75
//
// Formats measurement values into human-friendly text, e.g. 0.000000123 to "123.0n"
// or 651234.8 to "651.2348 kilo". The mantissa is rounded to a caller-chosen number
// of fractional digits and paired with a suitable SI prefix (exponent a multiple of
// three) or with a scientific exponent.
//
// All functions are stateless and allocation-free apart from the String convenience
// wrapper: the caller supplies the output buffer and receives the written length, or
// an error code. The output is plain ASCII with no terminator byte.

mod decompose;
mod prefix;

use std::fmt;

use ilog::IntLog;

use crate::decompose::{decompose, encoding, Decomposed, Encoding};

/// Maximum number of fractional digits accepted in [FmtOptions::fracs]
pub const MAX_FRACS: u32 = 9;

/// Upper bound on the rendered length in bytes: sign, three integer digits, decimal
/// point, [MAX_FRACS] fractional digits, separator and the longest prefix name.
pub const MAX_LEN: usize = 1 + 3 + 1 + MAX_FRACS as usize + 6;

// ---------------------------------------------------------------------------------------------

/// Error codes returned by the formatting functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Unspecific internal failure
    General,
    /// An option or the input value violates its contract
    Parameter,
    /// The output does not fit in the supplied buffer
    BufferSize,
    /// The value magnitude is outside the supported prefix range
    ValueRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::General => "internal error",
            Error::Parameter => "invalid parameter",
            Error::BufferSize => "buffer too small",
            Error::ValueRange => "value out of supported prefix range",
        })
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------------------------

/// Sign display policies for the rendered mantissa.
///
/// The six variants sit on two axes: the lead character given to positive values
/// (`+`, space, or nothing) and whether zero receives that same lead character or
/// stays unsigned. Negative values always get `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    /// Sign always visible, zero signed like a positive value: `+1.5`, `+0.0`
    FixZeroSign,
    /// Sign always visible, zero unsigned: `+1.5`, `0.0`
    FixZero,
    /// Space in place of `+` for positive values, zero gets the space: ` 1.5`, ` 0.0`
    FixSpaceSign,
    /// Space in place of `+` for positive values, zero unsigned: ` 1.5`, `0.0`
    FixSpace,
    /// No reserved column, sign always visible, zero signed: `+1.5`, `+0.0`
    VarSign,
    /// No reserved column, `-` for negative values only: `1.5`, `-1.5`, `0.0`
    Var,
}

/// Sign class of the value being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Magnitude {
    fn positive_lead(self) -> Option<u8> {
        match self {
            Magnitude::FixZeroSign | Magnitude::FixZero | Magnitude::VarSign => Some(b'+'),
            Magnitude::FixSpaceSign | Magnitude::FixSpace => Some(b' '),
            Magnitude::Var => None,
        }
    }

    fn zero_lead(self) -> Option<u8> {
        match self {
            Magnitude::FixZeroSign | Magnitude::VarSign => Some(b'+'),
            Magnitude::FixSpaceSign => Some(b' '),
            _ => None,
        }
    }

    /// Lead character preceding the first digit, if any.
    fn lead(self, sign: Sign) -> Option<u8> {
        match sign {
            Sign::Negative => Some(b'-'),
            Sign::Positive => self.positive_lead(),
            Sign::Zero => self.zero_lead(),
        }
    }
}

/// Scale suffix policies.
///
/// The SI-prefix variants factor into a style (letter or full name) and a separator
/// (none, underline, or space) between the mantissa and the prefix. Exponent 0 maps
/// to the empty prefix and emits no separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    /// Scientific exponent, e.g. `e-03`
    Scientific,
    /// Prefix letter, e.g. `m`
    Letter,
    /// Prefix name, e.g. `milli`
    Name,
    /// Underline and letter, e.g. `_m`
    UnderlineLetter,
    /// Underline and name, e.g. `_milli`
    UnderlineName,
    /// Space and letter, e.g. ` m`
    SpaceLetter,
    /// Space and name, e.g. ` milli`
    SpaceName,
}

impl Suffix {
    /// Exponent granularity of the decomposition: 1 for scientific, 3 for SI prefixes.
    fn step(self) -> i32 {
        if self == Suffix::Scientific { 1 } else { 3 }
    }

    fn separator(self) -> Option<u8> {
        match self {
            Suffix::UnderlineLetter | Suffix::UnderlineName => Some(b'_'),
            Suffix::SpaceLetter | Suffix::SpaceName => Some(b' '),
            _ => None,
        }
    }

    fn prefix(self, exponent: i32) -> &'static str {
        match self {
            Suffix::Scientific => "",
            Suffix::Letter | Suffix::UnderlineLetter | Suffix::SpaceLetter => prefix::letter(exponent),
            Suffix::Name | Suffix::UnderlineName | Suffix::SpaceName => prefix::name(exponent),
        }
    }
}

/// Formatting options, one immutable record per call
#[derive(Debug, Clone, Copy)]
pub struct FmtOptions {
    /// number of fractional digits in the rendered mantissa, `0..=MAX_FRACS`
    pub fracs: u32,
    /// sign display policy
    pub mag: Magnitude,
    /// scale suffix policy
    pub sip: Suffix,
}

impl Default for FmtOptions {
    fn default() -> Self {
        FmtOptions { fracs: 2, mag: Magnitude::Var, sip: Suffix::Letter }
    }
}

// ---------------------------------------------------------------------------------------------

/// Renders one value into an internal scratch buffer; the bounded copy into the
/// caller's buffer happens only once the exact length is known.
struct Renderer {
    buf: [u8; MAX_LEN],
    len: usize,
}

impl Renderer {
    fn new() -> Self {
        Renderer { buf: [0; MAX_LEN], len: 0 }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    fn push_str(&mut self, text: &str) {
        self.buf[self.len..self.len + text.len()].copy_from_slice(text.as_bytes());
        self.len += text.len();
    }

    /// Writes the decimal digits of `scaled` backwards, inserting the decimal point
    /// `fracs` digits from the right. `fracs` 0 renders no point.
    fn write_mantissa(&mut self, scaled: u64, fracs: u32) {
        let int_part = scaled / 10_u64.pow(fracs);
        let int_digits = if int_part == 0 { 1 } else { int_part.log10() + 1 };
        let end = self.len + int_digits + if fracs > 0 { 1 + fracs as usize } else { 0 };

        let mut value = scaled;
        let mut pos = end;
        for i in 0..int_digits + fracs as usize {
            pos -= 1;
            if fracs > 0 && i == fracs as usize {
                self.buf[pos] = b'.';
                pos -= 1;
            }
            self.buf[pos] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        debug_assert!(pos == self.len && value == 0);
        self.len = end;
    }

    /// Writes the scientific suffix: `e`, explicit sign, two-digit exponent.
    fn write_exponent(&mut self, exponent: i32) {
        self.push(b'e');
        self.push(if exponent < 0 { b'-' } else { b'+' });
        let k = exponent.unsigned_abs();
        debug_assert!(k <= prefix::MAX_EXPONENT as u32);
        self.push(b'0' + (k / 10) as u8);
        self.push(b'0' + (k % 10) as u8);
    }
}

fn render(value: f64, options: &FmtOptions) -> Result<Renderer, Error> {
    if options.fracs > MAX_FRACS {
        return Err(Error::Parameter);
    }
    let (dec, sign) = match encoding(value) {
        Encoding::Nan | Encoding::Inf => return Err(Error::Parameter),
        Encoding::Zero => (Decomposed { scaled: 0, exponent: 0 }, Sign::Zero),
        Encoding::Digits => {
            let sign = if value.is_sign_negative() { Sign::Negative } else { Sign::Positive };
            (decompose(value, options.fracs, options.sip.step())?, sign)
        }
    };

    let mut out = Renderer::new();
    if let Some(lead) = options.mag.lead(sign) {
        out.push(lead);
    }
    out.write_mantissa(dec.scaled, options.fracs);
    if options.sip == Suffix::Scientific {
        out.write_exponent(dec.exponent);
    } else {
        let prefix = options.sip.prefix(dec.exponent);
        if !prefix.is_empty() {
            if let Some(sep) = options.sip.separator() {
                out.push(sep);
            }
            out.push_str(prefix);
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------------------------

/// Formats `value` into `buffer` according to `options` and returns the written
/// length in bytes. The output is ASCII with no terminator; on error the buffer is
/// left untouched.
///
/// ```
/// use mantissify::{format_value, FmtOptions, Magnitude, Suffix, MAX_LEN};
///
/// let options = FmtOptions { fracs: 4, mag: Magnitude::Var, sip: Suffix::SpaceName };
/// let mut buffer = [0_u8; MAX_LEN];
/// let len = format_value(651234.8, &mut buffer, &options).unwrap();
/// assert_eq!(&buffer[..len], b"651.2348 kilo");
/// ```
///
/// Fails with [Error::Parameter] for non-finite values or `fracs` above [MAX_FRACS],
/// with [Error::ValueRange] when the magnitude leaves the prefix table (exponents
/// -24 to +24), and with [Error::BufferSize] when the output does not fit.
pub fn format_value(value: f64, buffer: &mut [u8], options: &FmtOptions) -> Result<usize, Error> {
    let out = render(value, options)?;
    let bytes = out.as_bytes();
    if bytes.len() > buffer.len() {
        return Err(Error::BufferSize);
    }
    buffer[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}

/// Length in bytes that [format_value] would write for `value` and `options`,
/// without writing anywhere.
pub fn required_len(value: f64, options: &FmtOptions) -> Result<usize, Error> {
    render(value, options).map(|out| out.len)
}

/// Formats `value` according to `options` into a new [String].
///
/// ```
/// use mantissify::{format_string, FmtOptions, Magnitude, Suffix};
///
/// let options = FmtOptions { fracs: 1, mag: Magnitude::Var, sip: Suffix::Letter };
/// assert_eq!(format_string(0.000000123, &options), Ok("123.0n".to_string()));
/// assert_eq!(format_string(-0.0045, &options), Ok("-4.5m".to_string()));
/// ```
pub fn format_string(value: f64, options: &FmtOptions) -> Result<String, Error> {
    let out = render(value, options)?;
    String::from_utf8(out.as_bytes().to_vec()).map_err(|_| Error::General)
}
