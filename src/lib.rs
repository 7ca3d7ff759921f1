//! Cycle-approximate simulator for a subset of the MOS 6502.
//!
//! A raw program image is loaded into a flat 64 KiB address space and
//! executed instruction by instruction until a BRK or a decode failure.
//! A window of the address space is a memory-mapped text display,
//! refreshed by polling a dirty-flag byte, and the whole address space
//! can be snapshotted to disk after a run.

#![warn(missing_docs)]

pub mod bus;
pub mod proc;
pub mod sim;
pub mod video;
