//! Channel Handles
//!
//! A [`ChannelHandle`] is one open instance of the command channel. Writes
//! go straight to the gateway. Reads are single-shot: a read at position
//! zero renders the status report once and later reads continue through that
//! same text, so a reader sees one consistent snapshot and then end-of-data
//! until the handle is repositioned.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use crate::gateway::command_gateway::{CommandGateway, WriteOutcome};
use crate::gateway::error::GatewayResult;

/// An open handle on the command channel with its own read cursor
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    gateway: Arc<CommandGateway>,
    position: u64,
    report: Option<String>,
}

impl ChannelHandle {
    pub fn new(gateway: Arc<CommandGateway>) -> Self {
        Self {
            gateway,
            position: 0,
            report: None,
        }
    }

    /// Current read cursor
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move the cursor back to the start so the next read reports again
    pub fn rewind_status(&mut self) {
        self.position = 0;
        self.report = None;
    }

    /// Send one command through the gateway
    pub fn write_command(&mut self, input: &[u8]) -> GatewayResult<WriteOutcome> {
        self.gateway.write_command(input)
    }

    /// Copy status report bytes at the cursor into `buf`.
    ///
    /// The report is rendered when reading from position zero. Returns the
    /// number of bytes copied, zero once the report has been consumed or
    /// when the cursor was moved without a report being rendered.
    pub fn read_status(&mut self, buf: &mut [u8]) -> usize {
        if self.position == 0 {
            self.report = Some(self.gateway.status_report());
        }
        let Some(report) = self.report.as_deref() else {
            return 0;
        };

        let start = usize::try_from(self.position).unwrap_or(usize::MAX).min(report.len());
        let len = (report.len() - start).min(buf.len());
        buf[..len].copy_from_slice(&report.as_bytes()[start..start + len]);
        self.position += len as u64;
        len
    }

    /// Read the remainder of the status report in one call
    pub fn status(&mut self) -> String {
        let mut buf = vec![0u8; self.gateway.status_capacity()];
        let len = self.read_status(&mut buf);
        buf.truncate(len);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Read for ChannelHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_status(buf))
    }
}

impl Write for ChannelHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.gateway.write(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for ChannelHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => (self.gateway.status_report().len() as u64).checked_add_signed(delta),
        };

        match target {
            Some(position) => {
                if position == 0 {
                    self.report = None;
                }
                self.position = position;
                Ok(position)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
