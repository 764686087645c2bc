//! Line-oriented console input
//!
//! One sample per line: a signal value (`1500`) in signal mode, or an
//! `x,y` / `x y` coordinate pair in target mode. Reading blocks until a
//! full line arrives.

use embedded_io::Read;
use heapless::Vec;

use cablepen_core::input::{parse_sample, ControlSample, InputError, InputMode};
use cablepen_core::traits::InputSource;

/// Default line capacity (bytes)
pub const DEFAULT_LINE_LEN: usize = 32;

/// Console sample source over any byte reader
pub struct ConsoleInput<R, const N: usize = DEFAULT_LINE_LEN> {
    reader: R,
    mode: InputMode,
    line: Vec<u8, N>,
    overflow: bool,
}

impl<R: Read, const N: usize> ConsoleInput<R, N> {
    pub fn new(reader: R, mode: InputMode) -> Self {
        Self {
            reader,
            mode,
            line: Vec::new(),
            overflow: false,
        }
    }

    /// Release the reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn finish_line(&mut self) -> Result<ControlSample, InputError> {
        let overflow = core::mem::replace(&mut self.overflow, false);
        let result = if overflow {
            Err(InputError::Malformed)
        } else {
            core::str::from_utf8(&self.line)
                .map_err(|_| InputError::Malformed)
                .and_then(|text| parse_sample(self.mode, text.trim()))
        };
        self.line.clear();
        result
    }
}

impl<R: Read, const N: usize> InputSource for ConsoleInput<R, N> {
    fn mode(&self) -> InputMode {
        self.mode
    }

    fn read(&mut self) -> Result<ControlSample, InputError> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) | Err(_) => {
                    // A partial line is lost with the stream
                    self.line.clear();
                    self.overflow = false;
                    return Err(InputError::Unavailable);
                }
                Ok(_) => {}
            }

            match byte[0] {
                b'\n' => return self.finish_line(),
                b'\r' => {}
                b => {
                    if self.line.push(b).is_err() {
                        self.overflow = true;
                    }
                }
            }
        }
    }
}
