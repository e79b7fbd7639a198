use std::io::{self, Write};

use crate::floorplan::{FloorPlanLayout, RoomPlacement};

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct SvgSettings {
    /// Edge length of the drawn footprint in pixels.
    pub canvas: f64,
    /// Blank border around the footprint in pixels.
    pub margin: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    pub font_size: f64,
}

impl Default for SvgSettings {
    fn default() -> Self {
        Self {
            canvas: 600.0,
            margin: 20.0,
            stroke: "#263238".to_string(),
            stroke_width: 2.0,
            fill: "#eceff1".to_string(),
            font_size: 14.0,
        }
    }
}

/// Writes a floor plan as a standalone SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    settings: SvgSettings,
}

impl SvgRenderer {
    pub fn new(settings: SvgSettings) -> Self {
        Self { settings }
    }

    pub fn settings_mut(&mut self) -> &mut SvgSettings {
        &mut self.settings
    }

    pub fn render(&self, writer: &mut impl Write, layout: &FloorPlanLayout) -> io::Result<()> {
        let s = &self.settings;
        let extent = s.canvas + 2.0 * s.margin;
        let scale = if layout.side > 0.0 {
            s.canvas / layout.side
        } else {
            0.0
        };

        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{extent:.0}" height="{extent:.0}" viewBox="0 0 {extent:.2} {extent:.2}">"#
        )?;
        writeln!(
            writer,
            "  <title>Floor plan: {:.1} x {:.1}</title>",
            layout.side, layout.side
        )?;
        for room in &layout.rooms {
            self.render_room(writer, room, scale)?;
        }
        writeln!(writer, "</svg>")?;
        writer.flush()
    }

    fn render_room(&self, writer: &mut impl Write, room: &RoomPlacement, scale: f64) -> io::Result<()> {
        let s = &self.settings;
        let x = s.margin + room.x * scale;
        let y = s.margin + room.y * scale;
        let width = room.width * scale;
        let height = room.height * scale;

        writeln!(
            writer,
            r#"  <rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            s.fill, s.stroke, s.stroke_width
        )?;

        let cx = x + width / 2.0;
        let cy = y + height / 2.0;
        let mut lines = room.label.lines();
        let first = lines.next().unwrap_or_default();
        write!(
            writer,
            r#"  <text x="{cx:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="middle">"#,
            cy - s.font_size * 0.2,
            s.font_size
        )?;
        write!(writer, r#"<tspan x="{cx:.2}">{}</tspan>"#, escape_xml(first))?;
        for line in lines {
            write!(
                writer,
                r#"<tspan x="{cx:.2}" dy="{}">{}</tspan>"#,
                s.font_size * 1.2,
                escape_xml(line)
            )?;
        }
        writeln!(writer, "</text>")
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
