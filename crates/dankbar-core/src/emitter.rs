//! Streaming JSON array writer for status-bar hosts.
//!
//! The host reads a header object, then one unbounded outer array whose
//! elements arrive one per line:
//!
//! ```text
//! {"version":1}
//! [[]
//! ,[{"name":"time",...}]
//! ,[{"name":"time",...}]
//! ```
//!
//! The outer array is never closed. The leading `[]` element is part of the
//! framing hosts have always received and stays as is.

use std::io::{self, Write};

use serde::Serialize;

use crate::event::Event;

/// Protocol version announced in the header.
pub const PROTOCOL_VERSION: u32 = 1;

#[derive(Serialize)]
struct Header {
    version: u32,
}

/// Writes the header once, then one encoded cycle per [`emit`](Self::emit).
pub struct StreamEmitter<W: Write> {
    out: W,
    header_written: bool,
    cycles: u64,
}

impl<W: Write> StreamEmitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
            cycles: 0,
        }
    }

    /// Write `{"version":1}\n[[]`. Subsequent calls are no-ops.
    pub fn write_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        let header = Header {
            version: PROTOCOL_VERSION,
        };
        serde_json::to_writer(&mut self.out, &header)?;
        self.out.write_all(b"\n[[]")?;
        self.out.flush()?;
        self.header_written = true;
        Ok(())
    }

    /// Write `,` + the JSON array of `events` + `\n`, then flush.
    ///
    /// Writes the header first if it has not been written yet.
    pub fn emit(&mut self, events: &[Event]) -> io::Result<()> {
        self.write_header()?;
        self.out.write_all(b",")?;
        serde_json::to_writer(&mut self.out, events)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.cycles += 1;
        Ok(())
    }

    /// Number of cycles emitted so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
