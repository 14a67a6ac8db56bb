use std::io::{self, Write};

use crate::{pos, Pos};

/// Character buffer for one frame, built fresh each time the screen is drawn.
#[derive(Debug)]
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// A canvas covering the terminal, keeping the last line free.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            height,
            lines,
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Paints every screen position, `row` being the line, where `f` has
    /// something to show.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, line) in self.lines.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(pos!(y as i32, x as i32)) {
                    *slot = char;
                }
            }
        }
    }

    /// Paints `text` on line `y` from the left edge, truncated to the width.
    pub fn text(&mut self, y: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(y) {
            for (slot, char) in line.iter_mut().zip(text.chars()) {
                *slot = char;
            }
        }
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        let clear = termion::clear::All;
        write!(out, "{clear}")?;
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line: String = line.iter().collect();
            write!(out, "{goto}{line}")?;
        }
        out.flush()
    }
}
