//! Handles all user-facing output for the CLI.
//!
//! Results are written uncolored so they can be piped; labels, prompts and
//! banners are colored when the color choice allows it.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::algebra::{Basis, Quaternion};

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    /// Writes one canonical result line.
    pub fn result(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", text)
    }

    /// Writes the quaternions parsed from one line, either as labeled
    /// components or as one JSON object per quaternion.
    pub fn parsed(&mut self, quaternions: &[Quaternion], json: bool) -> io::Result<()> {
        for (index, q) in quaternions.iter().enumerate() {
            if json {
                let text = serde_json::to_string(q).map_err(io::Error::other)?;
                writeln!(self.stdout, "{}", text)?;
            } else {
                self.components(index + 1, q)?;
            }
        }
        Ok(())
    }

    fn components(&mut self, number: usize, q: &Quaternion) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(self.stdout, "#{}", number)?;
        self.stdout.reset()?;

        for basis in Basis::ALL {
            self.stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(self.stdout, " {}=", basis)?;
            self.stdout.reset()?;
            write!(self.stdout, "{}", q.component(basis))?;
        }
        writeln!(self.stdout)
    }

    pub fn banner(&mut self, text: &str) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(self.stdout, "{}", text)?;
        self.stdout.reset()
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(self.stdout, "{}", text)?;
        self.stdout.reset()?;
        self.stdout.flush()
    }
}
