use crate::application::session::SessionOutput;
use crate::error::Result;
use std::io::Write;

/// Writes session outputs as JSON lines.
pub struct OutputWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_output(&mut self, output: &SessionOutput) -> Result<()> {
        serde_json::to_writer(&mut self.writer, output)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
