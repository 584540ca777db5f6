//! Render targets for a finished character grid.

use crate::grid::CharGrid;
use crate::Result;
use maud::{html, PreEscaped, DOCTYPE};
use std::io::Write;
use std::path::PathBuf;

/// Consumes a grid: rows top to bottom, columns left to right.
pub trait AsciiOutput {
    fn output(&mut self, grid: &CharGrid) -> Result<()>;
}

/// Writes the grid as plain text, one line per row.
pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn output(&mut self, grid: &CharGrid) -> Result<()> {
        if grid.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", grid)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the grid into a standalone HTML file.
pub struct HtmlOutput {
    path: PathBuf,
    font_family: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self { path: path.into(), font_family: font_family.into() }
    }
}

impl AsciiOutput for HtmlOutput {
    fn output(&mut self, grid: &CharGrid) -> Result<()> {
        if grid.is_empty() {
            return Ok(());
        }
        std::fs::write(&self.path, render_html(grid, &self.font_family))?;
        log::info!("wrote {}x{} grid to {}", grid.cols(), grid.rows(), self.path.display());
        Ok(())
    }
}

/// HTML document showing the grid in a monospace block.
///
/// Cell characters are escaped; spaces become `&nbsp;` so columns stay aligned.
pub fn render_html(grid: &CharGrid, font_family: &str) -> String {
    let style = format!("font-family:'{}',monospace;font-size:8px;line-height:1", font_family);
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "ASCII Art" }
            }
            body style="background:#000;color:#fff" {
                div style=(style) {
                    @for row in grid.iter_rows() {
                        @for &c in row {
                            @if c == ' ' {
                                (PreEscaped("&nbsp;"))
                            } @else {
                                (c)
                            }
                        }
                        br;
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> CharGrid {
        let mut grid = CharGrid::filled(2, 2, '#');
        grid.set_index(1, '<');
        grid.set_index(2, ' ');
        grid
    }

    #[test]
    fn test_console_rows_in_order() {
        let mut out = ConsoleOutput::new(Vec::new());
        out.output(&sample_grid()).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "#<\n #\n");
    }

    #[test]
    fn test_console_empty_grid_writes_nothing() {
        let mut out = ConsoleOutput::new(Vec::new());
        out.output(&CharGrid::empty()).unwrap();
        assert!(out.into_inner().is_empty());
    }

    #[test]
    fn test_html_escapes_cells() {
        let html = render_html(&sample_grid(), "Courier New");
        assert!(html.contains("#&lt;<br>&nbsp;#<br>"));
        assert!(html.contains("font-family:'Courier New'"));

        let html = render_html(&CharGrid::filled(1, 1, '&'), "A\"B");
        assert!(html.contains("&amp;<br>"));
        assert!(html.contains("font-family:'A&quot;B'"));
    }

    #[test]
    fn test_html_output_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let mut out = HtmlOutput::new(&path, "Courier New");
        out.output(&sample_grid()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
