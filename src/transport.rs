//! Byte transport abstraction — the UART's stand-in on the host.
//!
//! Provides a `Transport` trait for line-oriented byte I/O and three
//! implementations:
//! - `ConsoleTransport` for interactive use over a raw-mode terminal
//! - `ScriptTransport` for replaying a command file
//! - `MockTransport` for testing

use std::fs;
use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Blocking byte-level I/O toward the operator.
pub trait Transport {
    /// Block until one byte is available; `None` means the transport has
    /// closed and no further input will arrive.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Write a single byte.
    fn write_byte(&mut self, byte: u8);

    /// Write a string without a line ending.
    fn write_str(&mut self, s: &str);

    /// Write a string followed by the transport's line ending.
    fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\n");
    }
}

/// Interactive transport over a crossterm raw-mode terminal.
///
/// Raw mode has no local echo, so typed characters are echoed here, with a
/// destructive rendering for backspace. Ctrl-C and Ctrl-D report closure.
pub struct ConsoleTransport;

impl ConsoleTransport {
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for ConsoleTransport {
    fn drop(&mut self) {
        crossterm::terminal::disable_raw_mode().ok();
    }
}

impl Transport for ConsoleTransport {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        loop {
            let Event::Key(key) = crossterm::event::read()? else {
                continue; // ignore resize, mouse etc.
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Char(c)
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && (c == 'c' || c == 'd') =>
                {
                    return Ok(None);
                }
                KeyCode::Char(c) if c.is_ascii() && !c.is_control() => {
                    self.write_byte(c as u8); // local echo
                    return Ok(Some(c as u8));
                }
                KeyCode::Enter => return Ok(Some(13)),
                KeyCode::Backspace => {
                    self.write_str("\x08 \x08");
                    return Ok(Some(8));
                }
                _ => {}
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_str(&(byte as char).to_string());
    }

    fn write_str(&mut self, s: &str) {
        crossterm::execute!(io::stdout(), crossterm::style::Print(s)).ok();
        io::stdout().flush().ok();
    }

    fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }
}

/// Replays the bytes of a command file; writes go to stdout.
///
/// `\n` (and the `\n` of a `\r\n` pair) is delivered as the return byte so
/// ordinary text files drive the same line reader as the console.
pub struct ScriptTransport {
    bytes: Vec<u8>,
    next: usize,
}

impl ScriptTransport {
    pub fn from_file(path: &str) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self { bytes, next: 0 })
    }
}

impl Transport for ScriptTransport {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        while self.next < self.bytes.len() {
            let byte = self.bytes[self.next];
            self.next += 1;
            match byte {
                b'\r' => continue, // the pairing \n carries the return
                b'\n' => return Ok(Some(13)),
                _ => return Ok(Some(byte)),
            }
        }
        Ok(None)
    }

    fn write_byte(&mut self, byte: u8) {
        print!("{}", byte as char);
    }

    fn write_str(&mut self, s: &str) {
        print!("{}", s);
        io::stdout().flush().ok();
    }
}

/// Mock transport for testing — scripted input, recorded output.
#[cfg(test)]
pub struct MockTransport {
    input: Vec<u8>,
    next: usize,
    pub output: String,
}

#[cfg(test)]
impl MockTransport {
    /// Input is given as ordinary text; `\n` is delivered as the return byte.
    pub fn script(script: &str) -> Self {
        Self {
            input: script.bytes().collect(),
            next: 0,
            output: String::new(),
        }
    }
}

#[cfg(test)]
impl Transport for MockTransport {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        while self.next < self.input.len() {
            let byte = self.input[self.next];
            self.next += 1;
            match byte {
                b'\r' => continue,
                b'\n' => return Ok(Some(13)),
                _ => return Ok(Some(byte)),
            }
        }
        Ok(None)
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte as char);
    }

    fn write_str(&mut self, s: &str) {
        self.output.push_str(s);
    }
}
