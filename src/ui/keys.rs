use std::io::{ErrorKind, Read};

use anyhow::Result;

use super::editor::Command;

const ESC: u8 = 0x1b;

/// Byte-level key decoder for a raw-mode input stream. Arrow keys arrive as
/// three-byte ESC '[' X sequences; everything else is a single byte.
pub struct KeyDecoder<R: Read> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Decode the next logical key press, consuming one or three bytes.
    /// Blocks until input is available. Unrecognized or truncated input
    /// decodes to `Ignore`, never an error; end of stream decodes to `Quit`.
    pub fn next(&mut self) -> Result<Command> {
        let Some(byte) = self.read_byte()? else {
            return Ok(Command::Quit);
        };

        let command = match byte {
            ESC => self.decode_escape()?,
            b'\r' | b'\n' => Command::TogglePick,
            b'c' => Command::Combine,
            b'q' => Command::Quit,
            other => Command::Ignore(vec![other]),
        };
        Ok(command)
    }

    fn decode_escape(&mut self) -> Result<Command> {
        let Some(second) = self.read_byte()? else {
            return Ok(Command::Ignore(vec![ESC]));
        };
        if second != b'[' {
            return Ok(Command::Ignore(vec![ESC, second]));
        }

        let Some(third) = self.read_byte()? else {
            return Ok(Command::Ignore(vec![ESC, second]));
        };
        let command = match third {
            b'A' => Command::MoveUp,
            b'B' => Command::MoveDown,
            other => Command::Ignore(vec![ESC, second, other]),
        };
        Ok(command)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
