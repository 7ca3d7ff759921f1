//! Facilities for loading and running raw 6502 program images.

use crate::bus::{ADDR_SPACE_SIZE, AddressSpace, SimBus};
use crate::proc::{DecodeError, Mos6502, StepStatus};
use crate::video;
use log::{debug, info};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

//===========================================================================//

/// The address where program images are loaded and execution begins.
///
/// This is a build-time constant, not image metadata; images carry no
/// header.
pub const LOAD_ORIGIN: u16 = 0x0200;

/// File name of the address-space snapshot written after every run.
pub const SNAPSHOT_FILE: &str = "memory.dump";

//===========================================================================//

/// An error that ends a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image cannot fit between the load origin and the end
    /// of the address space.
    #[error(
        "program image is {size} bytes, but only {capacity} bytes fit \
         above ${origin:04x}"
    )]
    ImageTooLarge {
        /// Size of the rejected image in bytes.
        size: usize,
        /// Number of bytes available above the load origin.
        capacity: usize,
        /// The load origin the image was destined for.
        origin: u16,
    },
    /// The fetch-decode-execute loop reached an opcode it cannot decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A host I/O operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

//===========================================================================//

/// A single simulation run, exclusively owning the machine state and the
/// address space from load to snapshot.
pub struct Session {
    proc: Mos6502,
    mem: AddressSpace,
}

impl Session {
    /// Returns a fresh session: zeroed memory, power-on registers, and
    /// the program counter at the load origin.
    pub fn new() -> Session {
        Session { proc: Mos6502::new(LOAD_ORIGIN), mem: AddressSpace::new() }
    }

    /// Copies a raw program image into memory at the load origin.
    ///
    /// Oversized images are rejected here, before any instruction
    /// executes.
    pub fn load(&mut self, image: &[u8]) -> Result<(), SimError> {
        let capacity = ADDR_SPACE_SIZE - LOAD_ORIGIN as usize;
        if image.len() > capacity {
            return Err(SimError::ImageTooLarge {
                size: image.len(),
                capacity,
                origin: LOAD_ORIGIN,
            });
        }
        self.mem.load(LOAD_ORIGIN, image);
        info!("loaded {} byte image at ${:04x}", image.len(), LOAD_ORIGIN);
        Ok(())
    }

    /// Retires one instruction.
    pub fn step(&mut self) -> Result<StepStatus, DecodeError> {
        self.proc.step(&mut self.mem)
    }

    /// Runs the fetch-decode-execute loop until a BRK halts the machine
    /// or decoding fails.
    ///
    /// After every retired instruction the display dirty byte is polled
    /// (rendering to `display` when set) and then the pacing hook, if
    /// any, is invoked. The hook may block; it is the caller's throttle,
    /// not a concurrency point.
    pub fn run(
        &mut self,
        mut pace: Option<&mut dyn FnMut()>,
        display: &mut dyn Write,
    ) -> Result<(), SimError> {
        loop {
            debug!(
                "pc=${:04x} opcode=${:02x}",
                self.proc.pc(),
                self.mem.read_byte(self.proc.pc())
            );
            let status = self.step()?;
            video::refresh_if_dirty(&mut self.mem, display)?;
            if let Some(pace) = pace.as_mut() {
                pace();
            }
            match status {
                StepStatus::Running => {}
                StepStatus::InterruptPending => {
                    info!("halted by BRK at ${:04x}", self.proc.pc());
                    return Ok(());
                }
            }
        }
    }

    /// Writes the entire address space, verbatim and in address order, to
    /// the given file.
    pub fn write_snapshot(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.mem.as_bytes())
    }

    /// Returns the machine state, for inspection.
    pub fn proc(&self) -> &Mos6502 {
        &self.proc
    }

    /// Returns the address space, for inspection.
    pub fn mem(&self) -> &AddressSpace {
        &self.mem
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{ADDR_SPACE_SIZE, LOAD_ORIGIN, Session, SimError};
    use crate::bus::SimBus;

    #[test]
    fn load_writes_image_at_origin() {
        let mut session = Session::new();
        session.load(&[0xa9, 0x42]).unwrap();
        assert_eq!(session.mem().read_byte(LOAD_ORIGIN), 0xa9);
        assert_eq!(session.mem().read_byte(LOAD_ORIGIN + 1), 0x42);
        assert_eq!(session.proc().pc(), LOAD_ORIGIN);
    }

    #[test]
    fn load_accepts_image_filling_all_of_memory_above_origin() {
        let capacity = ADDR_SPACE_SIZE - LOAD_ORIGIN as usize;
        let mut session = Session::new();
        session.load(&vec![0xea; capacity]).unwrap();
        assert_eq!(session.mem().read_byte(0xffff), 0xea);
    }

    #[test]
    fn load_rejects_oversized_image() {
        let capacity = ADDR_SPACE_SIZE - LOAD_ORIGIN as usize;
        let mut session = Session::new();
        let result = session.load(&vec![0xea; capacity + 1]);
        assert!(matches!(result, Err(SimError::ImageTooLarge { .. })));
        // Nothing was loaded.
        assert!(session.mem().as_bytes().iter().all(|&cell| cell == 0));
    }
}

//===========================================================================//
