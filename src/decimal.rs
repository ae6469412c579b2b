use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

/// A signed decimal with exactly one fractional digit, stored as two integers.
///
/// `int` and `frac` always carry the same sign (or are zero), so `-1.5` is
/// `{ int: -1, frac: -5 }` and `-0.5` is `{ int: 0, frac: -5 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MiniDec {
    pub int: i64,
    pub frac: i8,
}

impl MiniDec {
    #[inline(always)]
    pub const fn new(int: i64, frac: i8) -> MiniDec {
        MiniDec { int, frac }
    }

    /// Applies `negative` to both components of an unsigned `int.frac`.
    #[inline(always)]
    pub const fn from_parts(negative: bool, int: i64, frac: u8) -> MiniDec {
        if negative {
            MiniDec::new(-int, -(frac as i8))
        } else {
            MiniDec::new(int, frac as i8)
        }
    }

    /// The value as a count of tenths, e.g. `-1.5` is `-15`.
    #[inline]
    pub const fn tenths(self) -> i128 {
        self.int as i128 * 10 + self.frac as i128
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.int < 0 || self.frac < 0
    }
}

// int and frac share a sign, so comparing the integer part first and the
// signed fractional digit on ties is the numeric order.
impl Ord for MiniDec {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.int.cmp(&other.int) {
            Ordering::Equal => self.frac.cmp(&other.frac),
            ord => ord,
        }
    }
}

impl PartialOrd for MiniDec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for MiniDec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}.{}",
            if self.is_negative() { "-" } else { "" },
            self.int.unsigned_abs(),
            self.frac.unsigned_abs()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseMiniDecError;

impl Display for ParseMiniDecError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("expected [-]digits.digit")
    }
}

impl std::error::Error for ParseMiniDecError {}

impl FromStr for MiniDec {
    type Err = ParseMiniDecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.as_bytes() {
            [b'-', rest @ ..] => (true, rest),
            rest => (false, rest),
        };
        let [int_digits @ .., b'.', frac] = body else {
            return Err(ParseMiniDecError);
        };
        if int_digits.is_empty() || !frac.is_ascii_digit() {
            return Err(ParseMiniDecError);
        }
        let mut int = 0i64;
        for c in int_digits {
            if !c.is_ascii_digit() {
                return Err(ParseMiniDecError);
            }
            int = int
                .checked_mul(10)
                .and_then(|n| n.checked_add(i64::from(c - b'0')))
                .ok_or(ParseMiniDecError)?;
        }
        Ok(MiniDec::from_parts(negative, int, frac - b'0'))
    }
}
