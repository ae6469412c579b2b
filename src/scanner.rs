//! Single pass over a shard's bytes, feeding `key;[-]int.frac` records
//! straight into a [`Trie`] without buffering keys or touching floats.

use crate::decimal::MiniDec;
use crate::error::{Error, Result};
use crate::trie::Trie;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InName,
    InInt,
    InFrac,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanner {
    allow_unterminated_tail: bool,
}

impl LineScanner {
    pub fn new(allow_unterminated_tail: bool) -> LineScanner {
        LineScanner {
            allow_unterminated_tail,
        }
    }

    /// Scans `data`, which must start at the first byte of a line, into
    /// `trie`. `base` is the absolute offset of `data` and only shows up in
    /// errors. Returns the number of records read.
    pub fn scan(&self, data: &[u8], base: usize, trie: &mut Trie) -> Result<u64> {
        let mut state = State::InName;
        let mut lines = 0u64;
        let mut created = 0usize;

        let mut key_start = 0;
        let mut key_end = 0;
        let mut negative = false;
        let mut int = 0i64;
        let mut int_digits = 0usize;
        let mut frac: Option<u8> = None;

        let mut cursor = trie.root_mut();

        for (i, &b) in data.iter().enumerate() {
            match state {
                State::InName => match b {
                    b';' => {
                        if i == key_start {
                            return Err(Error::malformed(base + i, "empty key"));
                        }
                        key_end = i;
                        state = State::InInt;
                    }
                    b'\n' => return Err(Error::malformed(base + i, "line ended inside key")),
                    _ => cursor = cursor.descend(b),
                },
                State::InInt => match b {
                    b'-' if i == key_end + 1 => negative = true,
                    b'0'..=b'9' => {
                        int = int
                            .checked_mul(10)
                            .and_then(|n| n.checked_add(i64::from(b - b'0')))
                            .ok_or_else(|| Error::malformed(base + i, "value out of range"))?;
                        int_digits += 1;
                    }
                    b'.' if int_digits > 0 => state = State::InFrac,
                    b'.' => return Err(Error::malformed(base + i, "value has no integer digits")),
                    b'\n' => {
                        return Err(Error::malformed(base + i, "line ended before fractional digit"))
                    }
                    b';' => return Err(Error::malformed(base + i, "unexpected ';' in value")),
                    _ => return Err(Error::malformed(base + i, "unexpected byte in value")),
                },
                State::InFrac => match (b, frac) {
                    (b'0'..=b'9', None) => frac = Some(b - b'0'),
                    (b'\n', Some(digit)) => {
                        let val = MiniDec::from_parts(negative, int, digit);
                        created += usize::from(cursor.record_at(&data[key_start..key_end], val));
                        lines += 1;

                        cursor = trie.root_mut();
                        state = State::InName;
                        key_start = i + 1;
                        negative = false;
                        int = 0;
                        int_digits = 0;
                        frac = None;
                    }
                    (b'\n', None) => {
                        return Err(Error::malformed(base + i, "missing fractional digit"))
                    }
                    (b';', _) => return Err(Error::malformed(base + i, "unexpected ';' in value")),
                    _ => {
                        return Err(Error::malformed(
                            base + i,
                            "expected one fractional digit and a line break",
                        ))
                    }
                },
            }
        }

        match (state, frac) {
            (State::InName, _) if key_start == data.len() => {}
            (State::InFrac, Some(digit)) if self.allow_unterminated_tail => {
                let val = MiniDec::from_parts(negative, int, digit);
                created += usize::from(cursor.record_at(&data[key_start..key_end], val));
                lines += 1;
            }
            _ => {
                return Err(Error::malformed(
                    base + key_start,
                    "final line is not terminated by a line break",
                ))
            }
        }

        trie.commit(created);
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> MiniDec {
        s.parse().unwrap()
    }

    fn scan(input: &[u8]) -> Result<Trie> {
        let mut trie = Trie::new();
        LineScanner::default().scan(input, 0, &mut trie)?;
        Ok(trie)
    }

    fn reason(err: Error) -> (usize, &'static str) {
        match err {
            Error::MalformedRecord { offset, reason } => (offset, reason),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_records() {
        let mut trie = Trie::new();
        let lines = LineScanner::default()
            .scan(b"Hamburg;12.0\nBulawayo;-8.9\nHamburg;-0.3\nSt. John's;15.2\n", 0, &mut trie)
            .unwrap();
        assert_eq!(lines, 4);
        assert_eq!(trie.len(), 3);

        let hamburg = trie.get(b"Hamburg").unwrap();
        assert_eq!(hamburg.count, 2);
        assert_eq!(hamburg.min, dec("-0.3"));
        assert_eq!(hamburg.max, dec("12.0"));
        assert_eq!(trie.get(b"Bulawayo").unwrap().min, dec("-8.9"));
        assert_eq!(trie.get(b"St. John's").unwrap().max, dec("15.2"));
    }

    #[test]
    fn test_scan_empty() {
        let trie = scan(b"").unwrap();
        assert!(trie.is_empty());
    }

    #[test]
    fn test_non_utf8_key() {
        let trie = scan(b"\xff\xfe;1.5\n\xff\xfe;2.5\n").unwrap();
        assert_eq!(trie.get(b"\xff\xfe").unwrap().count, 2);
    }

    #[test]
    fn test_missing_fraction() {
        let (offset, _) = reason(scan(b"A;1.0\nB;2\n").unwrap_err());
        assert_eq!(offset, 9);
    }

    #[test]
    fn test_newline_in_key() {
        let (offset, msg) = reason(scan(b"A;1.0\nB\n").unwrap_err());
        assert_eq!(offset, 7);
        assert_eq!(msg, "line ended inside key");
    }

    #[test]
    fn test_second_separator() {
        let (offset, _) = reason(scan(b"A;1;0.0\n").unwrap_err());
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_rejected_values() {
        assert!(scan(b";1.0\n").is_err());
        assert!(scan(b"A;.5\n").is_err());
        assert!(scan(b"A;1.\n").is_err());
        assert!(scan(b"A;1.25\n").is_err());
        assert!(scan(b"A;1-.5\n").is_err());
        assert!(scan(b"A;--1.5\n").is_err());
        assert!(scan(b"A;1x.5\n").is_err());
        assert!(scan(b"A;99999999999999999999.0\n").is_err());
    }

    #[test]
    fn test_nineteen_digit_values() {
        let trie = scan(b"A;9223372036854775807.9\nA;-9223372036854775807.9\nA;1000000000000000000.0\n").unwrap();
        let a = trie.get(b"A").unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(a.max, MiniDec::new(i64::MAX, 9));
        assert_eq!(a.min, MiniDec::new(-i64::MAX, -9));
        assert_eq!(a.mean(), Some(dec("333333333333333333.3")));
        assert!(scan(b"A;9223372036854775808.0\n").is_err());
    }

    #[test]
    fn test_unterminated_tail() {
        let (offset, _) = reason(scan(b"A;1.0\nB;2.5").unwrap_err());
        assert_eq!(offset, 6);
        assert!(scan(b"A;1.0\nB;2").is_err());
        assert!(scan(b"A;1.0\nB").is_err());

        let mut trie = Trie::new();
        let lines = LineScanner::new(true)
            .scan(b"A;1.0\nB;2.5", 0, &mut trie)
            .unwrap();
        assert_eq!(lines, 2);
        assert_eq!(trie.get(b"B").unwrap().max, dec("2.5"));

        let mut trie = Trie::new();
        assert!(LineScanner::new(true).scan(b"A;1.0\nB;2.", 0, &mut trie).is_err());
    }

    #[test]
    fn test_offsets_are_absolute() {
        let mut trie = Trie::new();
        let err = LineScanner::default()
            .scan(b"A;1.0\nB;x\n", 1000, &mut trie)
            .unwrap_err();
        assert_eq!(reason(err).0, 1008);
    }
}
