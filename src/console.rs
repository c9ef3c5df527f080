// /console.rs

// Line-oriented terminal I/O. Everything that talks to the player goes
// through `Console`, so a scripted buffer can stand in for stdin/stdout.
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::error::{AppError, Result};

pub const TEXT_WIDTH: usize = 76;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Title,
    Value,
    Hint,
    Error,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Title => Some(Color::Cyan),
            Tone::Value => Some(Color::Green),
            Tone::Hint => Some(Color::DarkGrey),
            Tone::Error => Some(Color::Red),
        }
    }
}

pub trait Console {
    /// Next line without its line ending, or `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn print(&mut self, text: &str) -> io::Result<()>;

    fn paint(&self, text: &str, tone: Tone) -> String;

    fn set_color(&mut self, color: bool);

    fn println(&mut self, text: &str) -> io::Result<()> {
        self.print(text)?;
        self.print("\n")
    }

    fn say(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        let painted = self.paint(text, tone);
        self.println(&painted)
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.say(text, Tone::Error)
    }

    // Shows the prompt and blocks for an answer. End of input is an error here.
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.print(prompt)?;
        self.read_line()?.ok_or(AppError::InputClosed)
    }
}

#[derive(Debug)]
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl LineConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio(color: bool) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(reader: R, writer: W, color: bool) -> Self {
        Self {
            reader,
            writer,
            color,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Invalid UTF-8 becomes U+FFFD and is rejected by whoever parses the line.
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        match tone.color() {
            Some(color) if self.color => text.with(color).to_string(),
            _ => text.to_string(),
        }
    }

    fn set_color(&mut self, color: bool) {
        self.color = color;
    }
}
