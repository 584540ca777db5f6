//! Interactive session: character set, resolution and render target.

use crate::charset::{CharRange, CharacterSet};
use crate::config::Config;
use crate::glyph::GlyphRasterizer;
use crate::output::{AsciiOutput, ConsoleOutput, HtmlOutput};
use crate::{Converter, Result};
use image::RgbImage;
use std::io::{BufRead, Write};
use thiserror::Error;

const RES_GROWTH_FACTOR: u32 = 2;

const MAX_RES_MSG: &str = "You're using the maximum resolution";
const MIN_RES_MSG: &str = "You're using the minimum resolution";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResChange {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Chars,
    Console,
    Render,
    Add(CharRange),
    Remove(CharRange),
    Res(ResChange),
}

/// Every variant reads "Invalid command" to the user; the detail goes to the log.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command")]
    Unknown(String),
    #[error("Invalid command")]
    WrongArity { command: String, args: usize },
    #[error("Invalid command")]
    BadRange(String),
    #[error("Invalid command")]
    BadResolution(String),
}

impl Command {
    /// Parse one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };

        let cmd = match (name, args) {
            ("exit", []) => Command::Exit,
            ("chars", []) => Command::Chars,
            ("console", []) => Command::Console,
            ("render", []) => Command::Render,
            ("add", [range]) => Command::Add(parse_range(range)?),
            ("remove", [range]) => Command::Remove(parse_range(range)?),
            ("res", ["up"]) => Command::Res(ResChange::Up),
            ("res", ["down"]) => Command::Res(ResChange::Down),
            ("res", [other]) => return Err(CommandError::BadResolution(other.to_string())),
            ("exit" | "chars" | "console" | "render" | "add" | "remove" | "res", _) => {
                return Err(CommandError::WrongArity {
                    command: name.to_string(),
                    args: args.len(),
                })
            }
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn parse_range(s: &str) -> std::result::Result<CharRange, CommandError> {
    CharRange::parse(s).ok_or_else(|| CommandError::BadRange(s.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State shared by all commands of one interactive run.
pub struct Session<R> {
    image: RgbImage,
    converter: Converter<R>,
    charset: CharacterSet,
    chars_in_row: u32,
    min_chars_in_row: u32,
    max_chars_in_row: u32,
    output: Box<dyn AsciiOutput>,
}

impl<R: GlyphRasterizer> Session<R> {
    /// Start a session rendering to the configured HTML file.
    pub fn new(image: RgbImage, converter: Converter<R>, config: &Config) -> Self {
        let (width, height) = image.dimensions();
        let min_chars_in_row = width.checked_div(height).unwrap_or(1).max(1);
        let max_chars_in_row = width.checked_div(config.min_pixels_per_char).unwrap_or(width);
        let chars_in_row = config.initial_chars_in_row.min(max_chars_in_row).max(min_chars_in_row);

        let charset = CharRange::parse(&config.initial_chars)
            .map(CharacterSet::from)
            .unwrap_or_default();

        log::debug!(
            "session: {} chars per row, bounds [{}, {}], {} initial chars",
            chars_in_row,
            min_chars_in_row,
            max_chars_in_row,
            charset.len()
        );

        Self {
            image,
            converter,
            charset,
            chars_in_row,
            min_chars_in_row,
            max_chars_in_row,
            output: Box::new(HtmlOutput::new(&config.output_file, config.font_family.as_str())),
        }
    }

    pub fn with_output(mut self, output: Box<dyn AsciiOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }

    pub fn chars_in_row(&self) -> u32 {
        self.chars_in_row
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min_chars_in_row, self.max_chars_in_row)
    }

    pub fn converter(&self) -> &Converter<R> {
        &self.converter
    }

    /// Run one command, writing any user-facing message to `out`.
    pub fn execute(&mut self, cmd: Command, out: &mut dyn Write) -> Result<Flow> {
        match cmd {
            Command::Exit => return Ok(Flow::Exit),
            Command::Chars => writeln!(out, "{}", self.charset)?,
            Command::Add(range) => self.charset.insert_range(range),
            Command::Remove(range) => self.charset.remove_range(range),
            Command::Res(change) => self.change_resolution(change, out)?,
            Command::Console => self.output = Box::new(ConsoleOutput::stdout()),
            Command::Render => self.render()?,
        }
        Ok(Flow::Continue)
    }

    fn change_resolution(&mut self, change: ResChange, out: &mut dyn Write) -> Result<()> {
        let next = match change {
            ResChange::Up => self.chars_in_row.saturating_mul(RES_GROWTH_FACTOR),
            ResChange::Down => self.chars_in_row / RES_GROWTH_FACTOR,
        };
        if next > self.max_chars_in_row {
            writeln!(out, "{}", MAX_RES_MSG)?;
        } else if next < self.min_chars_in_row {
            writeln!(out, "{}", MIN_RES_MSG)?;
        } else {
            self.chars_in_row = next;
            writeln!(out, "Width set to {}", next)?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if self.charset.is_empty() {
            log::debug!("render skipped: empty character set");
            return Ok(());
        }
        let grid = self.converter.convert(&self.image, self.chars_in_row, &self.charset)?;
        self.output.output(&grid)
    }

    /// Prompt-read-execute loop until `exit` or end of input.
    ///
    /// Parse errors and failed renders are reported and the loop goes on.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, ">>> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };

            let cmd = match Command::parse(&line?) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    log::debug!("rejected command: {:?}", e);
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };

            match self.execute(cmd, &mut out) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => {
                    log::error!("{}", e);
                    writeln!(out, "Error: {}", e)?;
                }
            }
        }
    }
}
