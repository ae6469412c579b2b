use std::io::{self, Write};

use crate::decimal::MiniDec;

/// Receives the final statistics, one call per key in sorted key order.
pub trait Sink {
    fn write(&mut self, key: &[u8], min: MiniDec, mean: MiniDec, max: MiniDec) -> io::Result<()>;

    /// Called once after the last key.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes `{key=min/mean/max, key=min/mean/max}` followed by a newline.
#[derive(Debug)]
pub struct BraceWriter<W: Write> {
    out: W,
    is_first: bool,
}

impl<W: Write> BraceWriter<W> {
    pub fn new(out: W) -> BraceWriter<W> {
        BraceWriter { out, is_first: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for BraceWriter<W> {
    fn write(&mut self, key: &[u8], min: MiniDec, mean: MiniDec, max: MiniDec) -> io::Result<()> {
        if self.is_first {
            self.is_first = false;
            self.out.write_all(b"{")?;
        } else {
            self.out.write_all(b", ")?;
        }
        write!(
            self.out,
            "{}={min}/{mean}/{max}",
            String::from_utf8_lossy(key)
        )
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.is_first {
            self.out.write_all(b"{")?;
        }
        self.out.write_all(b"}\n")?;
        self.out.flush()
    }
}
