//! Facilities for simulating the processor.

mod mos6502;

pub use mos6502::Mos6502;

use thiserror::Error;

//===========================================================================//

/// Carry flag (bit 0 of the status register).
pub const FLAG_C: u8 = 0b0000_0001;
/// Zero flag (bit 1).
pub const FLAG_Z: u8 = 0b0000_0010;
/// IRQ-disable flag (bit 2).
pub const FLAG_I: u8 = 0b0000_0100;
/// Decimal-mode flag (bit 3). Decimal arithmetic itself is not simulated.
pub const FLAG_D: u8 = 0b0000_1000;
/// Break flag (bit 4).
pub const FLAG_B: u8 = 0b0001_0000;
/// Bit 5, conventionally always set on real hardware. This simulation
/// stores the status register verbatim and does not force it.
pub const FLAG_ONE: u8 = 0b0010_0000;
/// Overflow flag (bit 6).
pub const FLAG_V: u8 = 0b0100_0000;
/// Negative flag (bit 7).
pub const FLAG_N: u8 = 0b1000_0000;

//===========================================================================//

/// An opcode that the dispatcher does not implement.
///
/// Decoding happens before any register or memory mutation for the step,
/// so the machine state still describes the moment just before the
/// failing fetch; in particular `pc` still addresses the opcode itself.
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("unimplemented opcode ${opcode:02x} at ${pc:04x}")]
pub struct DecodeError {
    /// The opcode byte that could not be decoded.
    pub opcode: u8,
    /// The address the opcode was fetched from.
    pub pc: u16,
}

//===========================================================================//

/// The state of the simulation after one retired instruction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StepStatus {
    /// The processor can retire further instructions.
    Running,
    /// A BRK instruction requested interrupt service. Interrupt vectoring
    /// is out of scope, so the run session treats this as a clean halt.
    InterruptPending,
}

//===========================================================================//
