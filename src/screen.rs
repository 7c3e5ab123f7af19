// Terminal control for interactive mode (clear screen, wait for a key).
// Only does anything when built with the `tui` feature.

use anyhow::Result;

/// Whether this build can drive the terminal directly
pub const INTERACTIVE_AVAILABLE: bool = cfg!(feature = "tui");

/// Interactive mode needs the `tui` build, no `--no-clear`, and a terminal
/// on both ends. Raw mode cannot be entered on piped or redirected streams.
pub fn interactive_mode(tui: bool, no_clear: bool, stdin_tty: bool, stdout_tty: bool) -> bool {
    tui && !no_clear && stdin_tty && stdout_tty
}

#[cfg(feature = "tui")]
pub fn clear() -> Result<()> {
    use anyhow::Context;
    use crossterm::{
        cursor::MoveTo,
        execute,
        terminal::{Clear, ClearType},
    };
    use std::io;

    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
        .context("Failed to clear terminal")?;
    Ok(())
}

/// Block until a key is pressed. Raw mode is always restored.
#[cfg(feature = "tui")]
pub fn wait_for_key() -> Result<()> {
    use anyhow::Context;
    use crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode},
    };

    enable_raw_mode().context("Failed to enable raw mode")?;

    let res = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => continue,
            Err(err) => break Err(err),
        }
    };

    disable_raw_mode().context("Failed to disable raw mode")?;
    res.context("Failed to read key press")?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
pub fn clear() -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "tui"))]
pub fn wait_for_key() -> Result<()> {
    Ok(())
}
