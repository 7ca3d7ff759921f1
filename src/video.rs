//! The memory-mapped text display.
//!
//! A fixed window of the address space doubles as a character
//! framebuffer. Programs draw by storing bytes into the window and then
//! setting a dirty-flag byte; the run loop polls that byte after every
//! retired instruction, so worst-case refresh latency is one
//! instruction, not a frame interval.

use crate::bus::SimBus;
use std::io::{self, Write};

//===========================================================================//

/// First address of the display window.
pub const DISPLAY_BASE: u16 = 0x8000;
/// Number of character cells in the display window.
pub const DISPLAY_CELLS: usize = 0x0400;
/// Cells rendered per text row.
pub const DISPLAY_COLS: usize = 40;
/// Address of the dirty-flag byte. Nonzero requests a refresh.
pub const DIRTY_ADDR: u16 = 0x8400;

const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

//===========================================================================//

/// Redraws the display if the dirty-flag byte is set, then clears the
/// flag. Returns whether a frame was drawn.
pub fn refresh_if_dirty(
    bus: &mut dyn SimBus,
    out: &mut dyn Write,
) -> io::Result<bool> {
    if bus.read_byte(DIRTY_ADDR) == 0 {
        return Ok(false);
    }
    render_frame(&*bus, out)?;
    bus.write_byte(DIRTY_ADDR, 0);
    Ok(true)
}

/// Writes one full frame: a terminal-clear sequence, then the window as
/// 40-column rows. Nonzero bytes print as themselves and zero cells as
/// spaces.
fn render_frame(bus: &dyn SimBus, out: &mut dyn Write) -> io::Result<()> {
    let mut frame = Vec::with_capacity(
        CLEAR_SCREEN.len() + DISPLAY_CELLS + DISPLAY_CELLS / DISPLAY_COLS,
    );
    frame.extend_from_slice(CLEAR_SCREEN);
    for (offset, cell) in (0..DISPLAY_CELLS).enumerate() {
        let data = bus.read_byte(DISPLAY_BASE.wrapping_add(cell as u16));
        frame.push(if data == 0 { b' ' } else { data });
        if (offset + 1) % DISPLAY_COLS == 0 {
            frame.push(b'\n');
        }
    }
    out.write_all(&frame)?;
    out.flush()
}

//===========================================================================//


//===========================================================================//
