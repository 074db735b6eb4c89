//! Bordered text boxes on a line-oriented console.
//!
//! Every box has the same total width. Lines may carry ANSI control
//! sequences; those never count toward the width used for cropping and
//! padding, and are dropped entirely once the user says the terminal does
//! not render them.

use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

pub const DEFAULT_BOX_WIDTH: usize = 60;
/// Narrowest box that still leaves room for borders, margins and some text.
pub const MIN_BOX_WIDTH: usize = 8;
/// Separates lines in the single-string form of a box.
pub const LINE_DELIMITER: char = ';';

const ESC: char = '\x1b';
const RESET: &str = "\x1b[0m";
const PROMPT: &str = "  => ";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("console input closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Whether control sequences reach the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleSupport {
    /// Probe has not run yet; styles are emitted until told otherwise.
    Unprobed,
    Enabled,
    Disabled,
}

impl StyleSupport {
    pub fn emits_styles(self) -> bool {
        !matches!(self, StyleSupport::Disabled)
    }
}

/// Wrap `text` in a foreground colour and a reset.
pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

/// Display columns of `text`, ignoring control sequences.
pub fn visible_width(text: &str) -> usize {
    crop(text, usize::MAX, false).visible
}

/// Split the single-string box form into lines. Delimiters inside a
/// control sequence (`ESC[38;5;2m`) do not split.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let ch = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        if ch == ESC {
            i = scan_sequence(text, i).end;
            continue;
        }
        if ch == LINE_DELIMITER {
            lines.push(&text[line_start..i]);
            line_start = i + ch.len_utf8();
        }
        i += ch.len_utf8();
    }
    lines.push(&text[line_start..]);
    lines
}

pub(crate) struct Cropped {
    pub(crate) text: String,
    pub(crate) visible: usize,
    pub(crate) styled: bool,
}

/// A control sequence found at some offset of a line.
struct Sequence {
    /// Byte offset just past the sequence.
    end: usize,
    /// Whether the sequence reached its terminator.
    complete: bool,
}

/// Scan the escape starting at `start`, which holds an ESC.
///
/// CSI (`ESC [` .. final byte `0x40..=0x7E`) and OSC (`ESC ]` .. BEL or
/// `ESC \`) run through their terminator; other `ESC x` forms take one
/// following byte in `0x30..=0x7E`; anything else is a lone ESC. An
/// unterminated CSI or OSC runs to the end of the text.
fn scan_sequence(text: &str, start: usize) -> Sequence {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    match bytes.get(i).copied() {
        Some(b'[') => {
            i += 1;
            while let Some(&b) = bytes.get(i) {
                i += 1;
                if (0x40..=0x7e).contains(&b) {
                    return Sequence { end: i, complete: true };
                }
            }
        }
        Some(b']') => {
            i += 1;
            while let Some(&b) = bytes.get(i) {
                if b == 0x07 {
                    return Sequence { end: i + 1, complete: true };
                }
                if b == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                    return Sequence { end: i + 2, complete: true };
                }
                i += 1;
            }
        }
        Some(b) if (0x30..=0x7e).contains(&b) => {
            return Sequence { end: i + 1, complete: true };
        }
        _ => return Sequence { end: i, complete: false },
    }
    Sequence {
        end: text.len(),
        complete: false,
    }
}

/// Copy `text` until `budget` visible columns have been written.
///
/// Complete escape sequences are zero width and kept only when
/// `emit_styles`; broken ones are dropped. Any other control character
/// (tab, carriage return, ...) becomes a single space so padding stays exact.
pub(crate) fn crop(text: &str, budget: usize, emit_styles: bool) -> Cropped {
    let mut out = String::with_capacity(text.len());
    let mut visible = 0usize;
    let mut styled = false;
    let mut i = 0;

    while i < text.len() && visible < budget {
        let ch = match text[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        if ch == ESC {
            let seq = scan_sequence(text, i);
            if seq.complete {
                if emit_styles {
                    out.push_str(&text[i..seq.end]);
                }
                styled = true;
            }
            i = seq.end;
            continue;
        }
        let (shown, w) = if ch.is_control() {
            (' ', 1)
        } else {
            (ch, ch.width().unwrap_or(0))
        };
        if visible + w > budget {
            break;
        }
        out.push(shown);
        visible += w;
        i += ch.len_utf8();
    }

    Cropped {
        text: out,
        visible,
        styled,
    }
}

fn border(left: char, right: char, width: usize) -> String {
    let mut s = String::with_capacity(width * 3);
    s.push(left);
    s.push_str(&"─".repeat(width.saturating_sub(2)));
    s.push(right);
    s
}

/// Lay out one box as printable rows.
///
/// `connect_above` swaps the top border for a joint so the box hangs off the
/// one printed before it; `connect_below` leaves the bottom open for the next.
pub fn compose_box<S: AsRef<str>>(
    lines: &[S],
    connect_above: bool,
    connect_below: bool,
    width: usize,
    styles: StyleSupport,
) -> Vec<String> {
    let width = width.max(MIN_BOX_WIDTH);
    let budget = width - 4;
    let emit = styles.emits_styles();

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(if connect_above {
        border('├', '┤', width)
    } else {
        border('┌', '┐', width)
    });

    for line in lines {
        let c = crop(line.as_ref(), budget, emit);
        let reset = if emit && c.styled { RESET } else { "" };
        rows.push(format!(
            "│ {}{}{} │",
            c.text,
            reset,
            " ".repeat(budget - c.visible)
        ));
    }

    if !connect_below {
        rows.push(border('└', '┘', width));
    }
    rows
}

/// Boxes out, numbers and lines in.
pub struct Console<R, W> {
    input: R,
    out: W,
    width: usize,
    styles: StyleSupport,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, width: usize) -> Self {
        Self {
            input,
            out,
            width: width.max(MIN_BOX_WIDTH),
            styles: StyleSupport::Unprobed,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn styles(&self) -> StyleSupport {
        self.styles
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fix style support without asking. Counts as a completed probe.
    pub fn set_style_support(&mut self, enabled: bool) {
        self.styles = if enabled {
            StyleSupport::Enabled
        } else {
            StyleSupport::Disabled
        };
    }

    pub fn render_box<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        connect_above: bool,
        connect_below: bool,
    ) -> Result<()> {
        for row in compose_box(lines, connect_above, connect_below, self.width, self.styles) {
            writeln!(self.out, "{row}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// `render_box` for a `;`-separated string.
    pub fn render_text(&mut self, text: &str, connect_above: bool, connect_below: bool) -> Result<()> {
        self.render_box(&split_lines(text), connect_above, connect_below)
    }

    /// Ask once whether coloured text shows up; remember the answer.
    pub fn probe_style_support(&mut self) -> Result<bool> {
        if self.styles != StyleSupport::Unprobed {
            return Ok(self.styles.emits_styles());
        }
        let rule = "-".repeat(self.width - 4);
        let sample = paint("HOPEFULLY GREEN TEXT", Color::Green);
        self.render_box(
            &[
                "COLOR SUPPORT CHECK",
                rule.as_str(),
                "Is the following text green?",
                sample.as_str(),
                "1) Yes",
                "2) No",
            ],
            false,
            false,
        )?;
        let enabled = self.read_int(1, 2)? == 1;
        self.set_style_support(enabled);
        log::debug!("style support probed: {enabled}");
        Ok(enabled)
    }

    fn next_line(&mut self) -> Result<String> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(ConsoleError::Closed);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        writeln!(self.out)?;
        Ok(buf)
    }

    /// Prompt until an integer in `min..=max` is entered.
    pub fn read_int(&mut self, min: i64, max: i64) -> Result<i64> {
        writeln!(self.out)?;
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            let line = self.next_line()?;
            match line.trim().parse::<i64>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                _ => log::debug!("rejected input {line:?}, want {min}..={max}"),
            }
        }
    }

    pub fn read_line(&mut self) -> Result<String> {
        write!(self.out, "\n{PROMPT}")?;
        self.out.flush()?;
        self.next_line()
    }
}
