//! Flat position log output
//!
//! Each position becomes one line `x;y`, with both coordinates printed in
//! Rust's shortest round-trip `f64` form and no header. Lines appear in
//! trajectory order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::vector::Vec2;
use crate::Result;

/// Destination for a finished trajectory
pub trait PositionSink {
    /// Write every position in order, returning how many were written
    fn write_positions(&mut self, positions: &[Vec2<f64>]) -> Result<usize>;
}

/// Writes positions as semicolon-separated lines
#[derive(Debug)]
pub struct FlatLogWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl FlatLogWriter<BufWriter<File>> {
    /// Create (or truncate) the log at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!("Opened position log {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FlatLogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Format a single position as a log line, without the newline
    pub fn format_line(position: &Vec2<f64>) -> String {
        format!("{};{}", position.x(), position.y())
    }

    /// Write a free-form line in place of position data
    pub fn write_placeholder(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> PositionSink for FlatLogWriter<W> {
    fn write_positions(&mut self, positions: &[Vec2<f64>]) -> Result<usize> {
        for position in positions {
            writeln!(self.writer, "{}", Self::format_line(position))?;
        }
        self.lines += positions.len();
        Ok(positions.len())
    }
}
