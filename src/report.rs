use crate::Variant;
use std::{
    fmt::Display,
    io::{self, Write},
};

/// Prefixed, line-flushed progress output for one check run
pub struct Report<W> {
    out: W,
    variant: Variant,
}

impl<W: Write> Report<W> {
    #[must_use]
    pub const fn new(out: W, variant: Variant) -> Self {
        Self { out, variant }
    }

    /// Write one line tagged with the variant prefix and flush it
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to write or flush
    pub fn line(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "{} {message}", self.variant.prefix())?;
        self.out.flush()
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}
