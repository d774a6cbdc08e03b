//! Terminal output for command results.
//!
//! Handlers produce markdown; the renderer either prints it untouched or
//! styles it with termimad. Headers keep their `#` markers so the rich and
//! plain outputs line up.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print markdown to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write(&mut out, markdown)?;
        out.flush()?;
        Ok(())
    }

    fn write(&self, out: &mut impl Write, markdown: &str) -> io::Result<()> {
        if !self.rich_enabled {
            out.write_all(markdown.as_bytes())?;
            if !markdown.ends_with('\n') {
                writeln!(out)?;
            }
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                writeln!(out, "\x1b[1;34m{line}\x1b[0m")?;
            } else if line.contains('✓') {
                writeln!(out, "\x1b[32m{}\x1b[0m", self.skin.inline(line))?;
            } else {
                writeln!(out, "{}", self.skin.inline(line))?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
