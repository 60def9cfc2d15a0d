// src/lib.rs

//! Character-cell console rendering with a dynamic table widget.
//!
//! A [`Console`] owns a framebuffer of colored [`Cell`]s and flushes it to a
//! [`TerminalBackend`] in one write. A [`Table`] partitions the framebuffer
//! into columns and rows of content-bearing cells that can be filled,
//! grown, shrunk and reflowed after the terminal is resized.
//!
//! ```no_run
//! use celltable::{Console, ConsoleBackend, Foreground, Background, Table};
//! use celltable::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let backend = ConsoleBackend::new(&config.console)?;
//! let mut console = Console::with_config(backend, config)?;
//! let mut table = Table::new(&mut console, 3, 4)?;
//! table.set_cell_value(&mut console, 0, 0, "hello", Foreground::BRIGHT_GREEN, Background::BLACK)?;
//! console.render(true)?;
//! table.remove();
//! console.reset()?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod cell;
pub mod color;
pub mod config;
pub mod console;
pub mod error;
pub mod keys;
pub mod logging;
pub mod table;

pub use backends::{ConsoleBackend, HeadlessBackend, TerminalBackend};
pub use cell::Cell;
pub use color::{Background, Foreground, Intensity, Shade};
pub use console::Console;
pub use error::{Error, Result};
pub use keys::KeySymbol;
pub use table::{Table, TableCell};
