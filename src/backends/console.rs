// src/backends/console.rs

//! Provides a `TerminalBackend` for a Unix tty using termios and ANSI escape codes.
//!
//! The terminal is switched to raw mode and the alternate screen when the
//! original state is captured, and both are undone on restore. Frames are
//! encoded into one string and handed to the tty in a single `write_all`,
//! so a partially drawn frame is never visible.

use std::io::{self, stdout, Read, Write};
use std::mem;
use std::os::unix::io::RawFd;

use anyhow::{bail, Context, Result};
use libc::{winsize, STDIN_FILENO, STDOUT_FILENO, TIOCGWINSZ};
use log::{debug, error, info, trace, warn};
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSANOW, VMIN, VTIME};

use crate::backends::{OriginalState, TerminalBackend};
use crate::cell::Cell;
use crate::color::{Background, Foreground};
use crate::config::ConsoleConfig;
use crate::keys::KeySymbol;

// --- ANSI Escape Code Constants ---
const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const CURSOR_HOME: &str = "\x1b[H";
const ALT_SCREEN_ENTER: &str = "\x1b[?1049h";
const ALT_SCREEN_LEAVE: &str = "\x1b[?1049l";
const SGR_PREFIX: &str = "\x1b[";
const SGR_SUFFIX: char = 'm';
const SGR_SEPARATOR: char = ';';
const SGR_RESET_ALL: u16 = 0;

/// A `TerminalBackend` drawing to the process's controlling tty.
pub struct ConsoleBackend {
    input_fd: RawFd,
    output_fd: RawFd,
    fallback_cols: u16,
    fallback_rows: u16,
    /// Set while the tty is in raw mode; taken on restore.
    active_termios: Option<Termios>,
}

impl ConsoleBackend {
    /// Opens the backend on stdin/stdout.
    ///
    /// Fails if either is not a terminal.
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        info!("Creating new ConsoleBackend.");
        for (fd, name) in [(STDIN_FILENO, "stdin"), (STDOUT_FILENO, "stdout")] {
            // SAFETY: isatty only inspects the descriptor.
            if unsafe { libc::isatty(fd) } != 1 {
                bail!("ConsoleBackend: {} is not a terminal", name);
            }
        }
        Ok(ConsoleBackend {
            input_fd: STDIN_FILENO,
            output_fd: STDOUT_FILENO,
            fallback_cols: config.fallback_cols,
            fallback_rows: config.fallback_rows,
            active_termios: None,
        })
    }

    fn emit(&self, sequence: &str) -> Result<()> {
        let mut out = stdout().lock();
        out.write_all(sequence.as_bytes())
            .and_then(|_| out.flush())
            .context("ConsoleBackend: Failed to write to stdout")
    }

    fn restore_termios(&mut self, original: &Termios) -> Result<()> {
        tcsetattr(self.input_fd, TCSANOW, original)
            .context("ConsoleBackend: Failed to restore original terminal attributes")?;
        self.active_termios = None;
        debug!("ConsoleBackend: Original terminal attributes restored.");
        Ok(())
    }
}

impl TerminalBackend for ConsoleBackend {
    type Saved = Termios;

    fn size(&self) -> Result<(usize, usize)> {
        let (cols, rows) = get_terminal_size_cells(self.output_fd)?;
        let cols = if cols == 0 { self.fallback_cols } else { cols };
        let rows = if rows == 0 { self.fallback_rows } else { rows };
        Ok((rows as usize, cols as usize))
    }

    fn capture_original_state(&mut self) -> Result<OriginalState<Termios>> {
        let original = Termios::from_fd(self.input_fd)
            .context("ConsoleBackend: Failed to read terminal attributes")?;

        let mut raw_termios = original;
        // Disable echo, canonical mode (line buffering), and signal generation.
        raw_termios.c_lflag &= !(ECHO | ICANON | ISIG);
        raw_termios.c_iflag &=
            !(libc::IXON | libc::IXOFF | libc::ICRNL | libc::INLCR | libc::IGNCR);
        raw_termios.c_oflag &= !libc::OPOST;
        // Key reads block until exactly one byte is available.
        raw_termios.c_cc[VMIN] = 1;
        raw_termios.c_cc[VTIME] = 0;
        tcsetattr(self.input_fd, TCSANOW, &raw_termios)
            .context("ConsoleBackend: Failed to set raw terminal attributes")?;
        self.active_termios = Some(original);
        debug!("ConsoleBackend: Terminal set to raw mode.");

        self.emit(ALT_SCREEN_ENTER)?;

        // A tty cannot report its palette defaults; assume the conventional ones.
        Ok(OriginalState {
            default_fg: Foreground::default(),
            default_bg: Background::default(),
            cursor_visible: true,
            saved: original,
        })
    }

    fn restore_original_state(&mut self, state: &OriginalState<Termios>) -> Result<()> {
        info!("ConsoleBackend: Restoring original terminal state.");
        self.emit(&format!(
            "{}{}{}{}",
            SGR_PREFIX, SGR_RESET_ALL, SGR_SUFFIX, ALT_SCREEN_LEAVE
        ))?;
        self.restore_termios(&state.saved)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.emit(if visible { CURSOR_SHOW } else { CURSOR_HIDE })
    }

    fn home_cursor(&mut self) -> Result<()> {
        self.emit(CURSOR_HOME)
    }

    fn write_grid(&mut self, cells: &[Cell], width: usize, height: usize) -> Result<()> {
        let frame = encode_frame(cells, width, height)?;
        trace!(
            "ConsoleBackend: writing {}x{} frame ({} bytes)",
            width,
            height,
            frame.len()
        );
        self.emit(&frame)
    }

    fn read_key_blocking(&mut self) -> Result<KeySymbol> {
        let mut byte = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut byte) {
                Ok(0) => bail!("ConsoleBackend: EOF on stdin while waiting for a key"),
                Ok(_) => return Ok(KeySymbol::from_byte(byte[0])),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {
                    trace!("ConsoleBackend: stdin read Interrupted.");
                }
                Err(e) => return Err(e).context("ConsoleBackend: Error reading from stdin"),
            }
        }
    }
}

/// Encodes a row-major cell grid as one ANSI string.
///
/// Every row is positioned explicitly, and SGR codes are only emitted when
/// the colors change from the previous cell.
pub fn encode_frame(cells: &[Cell], width: usize, height: usize) -> Result<String> {
    if cells.len() != width * height {
        bail!(
            "encode_frame: {} cells do not fill a {}x{} grid",
            cells.len(),
            width,
            height
        );
    }

    // Rough capacity: one byte per glyph plus row positioning.
    let mut out = String::with_capacity(cells.len() + height * 8 + 16);
    let mut current: Option<(Foreground, Background)> = None;

    for (row, line) in cells.chunks(width.max(1)).take(height).enumerate() {
        out.push_str(&format_cursor_position(row + 1, 1));
        for cell in line {
            if current != Some((cell.fg, cell.bg)) {
                push_sgr(&mut out, &[SGR_RESET_ALL, cell.fg.sgr_code(), cell.bg.sgr_code()]);
                current = Some((cell.fg, cell.bg));
            }
            out.push(cell.c);
        }
    }
    push_sgr(&mut out, &[SGR_RESET_ALL]);
    Ok(out)
}

fn push_sgr(out: &mut String, codes: &[u16]) {
    out.push_str(SGR_PREFIX);
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            out.push(SGR_SEPARATOR);
        }
        out.push_str(&code.to_string());
    }
    out.push(SGR_SUFFIX);
}

fn format_cursor_position(row_1_based: usize, col_1_based: usize) -> String {
    format!("\x1b[{};{}H", row_1_based, col_1_based)
}

/// Returns `(cols, rows)` as reported by the kernel; zero means unknown.
fn get_terminal_size_cells(fd: RawFd) -> Result<(u16, u16)> {
    // SAFETY: TIOCGWINSZ writes a `winsize` into the zeroed struct we pass.
    unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(anyhow::Error::from(io::Error::last_os_error())
                .context("ConsoleBackend: ioctl(TIOCGWINSZ) failed"));
        }
        Ok((winsz.ws_col, winsz.ws_row))
    }
}

impl Drop for ConsoleBackend {
    fn drop(&mut self) {
        if let Some(original) = self.active_termios.take() {
            warn!("ConsoleBackend: Dropped while in raw mode, restoring terminal attributes.");
            if let Err(e) = self.restore_termios(&original) {
                error!("ConsoleBackend: Error during cleanup in drop: {:#}", e);
            }
            if let Err(e) = self.emit(&format!("{}{}", ALT_SCREEN_LEAVE, CURSOR_SHOW)) {
                error!("ConsoleBackend: Error during cleanup in drop: {:#}", e);
            }
        }
    }
}
