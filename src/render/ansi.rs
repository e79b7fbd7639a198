use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::floorplan::FloorPlanLayout;

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const UP: u8 = 4;
const DOWN: u8 = 8;

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct PreviewSettings {
    /// Width of the preview in terminal cells.
    pub columns: u16,
    /// Border colour; `None` writes plain text.
    pub color: Option<Color>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            columns: 60,
            color: Some(Color::Cyan),
        }
    }
}

/// Box-drawing preview of a floor plan for terminals.
pub struct AnsiRenderer {
    settings: PreviewSettings,
}

impl AnsiRenderer {
    pub fn new(settings: PreviewSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(PreviewSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut PreviewSettings {
        &mut self.settings
    }

    /// Rasterise the plan into plain text lines.
    pub fn lines(&self, layout: &FloorPlanLayout) -> Vec<String> {
        let columns = usize::from(self.settings.columns.max(8));
        // Terminal cells are roughly twice as tall as they are wide.
        let rows = (columns / 2).max(4);
        let mut canvas = Canvas::new(columns, rows);

        let scale_x = (columns - 1) as f64 / layout.side;
        let scale_y = (rows - 1) as f64 / layout.side;

        for room in &layout.rooms {
            let x0 = (room.x * scale_x).round() as usize;
            let x1 = (room.rect().right() * scale_x).round() as usize;
            let y0 = (room.y * scale_y).round() as usize;
            let y1 = (room.rect().bottom() * scale_y).round() as usize;
            canvas.outline(x0, y0, x1, y1);

            let mid = (y0 + y1) / 2;
            let mut label = room.label.lines();
            if let Some(name) = label.next() {
                canvas.label(x0, x1, mid, name);
            }
            if let Some(dims) = label.next() {
                if y1.saturating_sub(y0) >= 4 {
                    canvas.label(x0, x1, mid + 1, dims);
                }
            }
        }

        canvas.into_lines()
    }

    pub fn render(&self, writer: &mut impl Write, layout: &FloorPlanLayout) -> io::Result<()> {
        for line in self.lines(layout) {
            match self.settings.color {
                Some(color) => {
                    writer
                        .queue(SetForegroundColor(color))?
                        .queue(Print(line))?
                        .queue(ResetColor)?;
                }
                None => {
                    writer.queue(Print(line))?;
                }
            }
            writer.queue(Print("\n"))?;
        }
        writer.flush()
    }
}

struct Canvas {
    width: usize,
    height: usize,
    edges: Vec<u8>,
    text: Vec<Option<char>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            edges: vec![0; width * height],
            text: vec![None; width * height],
        }
    }

    fn mark(&mut self, x: usize, y: usize, bits: u8) {
        if x < self.width && y < self.height {
            self.edges[y * self.width + x] |= bits;
        }
    }

    fn outline(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for x in x0..x1 {
            for y in [y0, y1] {
                self.mark(x, y, RIGHT);
                self.mark(x + 1, y, LEFT);
            }
        }
        for y in y0..y1 {
            for x in [x0, x1] {
                self.mark(x, y, DOWN);
                self.mark(x, y + 1, UP);
            }
        }
    }

    /// Centre `text` between the walls at `x0` and `x1`, truncating to fit.
    fn label(&mut self, x0: usize, x1: usize, y: usize, text: &str) {
        let inner = x1.saturating_sub(x0).saturating_sub(1);
        if inner == 0 || y >= self.height {
            return;
        }

        let mut fitted = String::new();
        for ch in text.chars() {
            fitted.push(ch);
            if display_width(&fitted) > inner {
                fitted.pop();
                break;
            }
        }

        let start = x0 + 1 + (inner - display_width(&fitted)) / 2;
        for (offset, ch) in fitted.chars().enumerate() {
            let x = start + offset;
            if x < self.width {
                self.text[y * self.width + x] = Some(ch);
            }
        }
    }

    fn into_lines(self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line: String = (0..self.width)
                    .map(|x| {
                        let idx = y * self.width + x;
                        self.text[idx].unwrap_or_else(|| glyph(self.edges[idx]))
                    })
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

fn glyph(bits: u8) -> char {
    match bits {
        0 => ' ',
        b if b == LEFT | RIGHT || b == LEFT || b == RIGHT => '─',
        b if b == UP | DOWN || b == UP || b == DOWN => '│',
        b if b == RIGHT | DOWN => '┌',
        b if b == LEFT | DOWN => '┐',
        b if b == RIGHT | UP => '└',
        b if b == LEFT | UP => '┘',
        b if b == LEFT | RIGHT | DOWN => '┬',
        b if b == LEFT | RIGHT | UP => '┴',
        b if b == UP | DOWN | RIGHT => '├',
        b if b == UP | DOWN | LEFT => '┤',
        _ => '┼',
    }
}

/// Display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}
