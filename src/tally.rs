use crate::decimal::MiniDec;

/// Running statistics for one key.
///
/// The sum is kept as separate whole and fractional totals, so the true sum
/// is `sum_int + sum_frac / 10` exactly and no precision is ever lost. Both
/// totals are `i128`: a mapped file holds fewer than 2^62 lines of at most
/// `i64::MAX` each, so they cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub min: MiniDec,
    pub max: MiniDec,
    pub sum_int: i128,
    pub sum_frac: i128,
    pub count: u64,
}

impl Tally {
    #[inline(always)]
    pub fn new(val: MiniDec) -> Tally {
        Tally {
            min: val,
            max: val,
            sum_int: i128::from(val.int),
            sum_frac: i128::from(val.frac),
            count: 1,
        }
    }

    #[inline(always)]
    pub fn add(&mut self, val: MiniDec) {
        self.count += 1;
        self.sum_int += i128::from(val.int);
        self.sum_frac += i128::from(val.frac);
        if val < self.min {
            self.min = val;
        }
        if val > self.max {
            self.max = val;
        }
    }

    #[inline(always)]
    pub fn merge(&mut self, other: Tally) {
        self.count += other.count;
        self.sum_int += other.sum_int;
        self.sum_frac += other.sum_frac;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    /// The exact sum as `(int, frac)` with both parts sharing a sign, after
    /// carrying the fractional total into the whole part.
    pub fn sum(&self) -> (i128, i8) {
        let mut int = self.sum_int + self.sum_frac / 10;
        let mut frac = self.sum_frac % 10;
        // carrying can leave the parts with opposite signs, e.g. 3 and -5
        if int > 0 && frac < 0 {
            int -= 1;
            frac += 10;
        } else if int < 0 && frac > 0 {
            int += 1;
            frac -= 10;
        }
        (int, i8::try_from(frac).unwrap_or_default())
    }

    /// Mean rounded to one fractional digit using integer arithmetic only.
    ///
    /// The quotient is computed on the magnitude of the sum and rounded up
    /// when the leftover is strictly more than half of `count`; the sign is
    /// applied afterwards, so rounding is symmetric around zero. The mean lies
    /// between `min` and `max`, so it always fits a [`MiniDec`]; `None` is
    /// only returned for a tally whose fields were set by hand to disagree.
    pub fn mean(&self) -> Option<MiniDec> {
        let (sum_int, sum_frac) = self.sum();
        let negative = sum_int < 0 || sum_frac < 0;
        let count = u128::from(self.count);
        let sum_int = sum_int.unsigned_abs();
        let sum_frac = u128::from(sum_frac.unsigned_abs());

        let mut mean_int = sum_int / count;
        let carry = (sum_int % count) * 10 + sum_frac;
        let mut mean_frac = carry / count;
        let remainder = carry % count;
        if remainder * 2 > count {
            mean_frac += 1;
            if mean_frac == 10 {
                mean_frac = 0;
                mean_int += 1;
            }
        }

        let int = i64::try_from(mean_int).ok()?;
        let frac = u8::try_from(mean_frac).ok()?;
        Some(MiniDec::from_parts(negative, int, frac))
    }
}
