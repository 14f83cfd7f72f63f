use std::io::{self, Write};

/// Writer that duplicates everything written to it across an ordered list of sinks
///
/// Writes reach the sinks in the order they were added. The first sink error
/// is returned to the caller; sinks after it do not see that write.
#[derive(Default)]
pub struct Tee<'a> {
    sinks: Vec<Box<dyn Write + 'a>>,
}

impl<'a> Tee<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Append a sink, builder style
    #[must_use]
    pub fn with(mut self, sink: impl Write + 'a) -> Self {
        self.push(sink);
        self
    }

    pub fn push(&mut self, sink: impl Write + 'a) {
        self.sinks.push(Box::new(sink));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Write for Tee<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
