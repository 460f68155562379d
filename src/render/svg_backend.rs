use std::fmt::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into a standalone SVG document.
///
/// The root element carries a `viewBox` so the host can scale it to any
/// container width. Each render replaces the previous document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    element_id: Option<String>,
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `id` attribute written on the root `svg` element.
    #[must_use]
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_frame(&self, frame: &RenderFrame, out: &mut String) -> std::fmt::Result {
        let width = frame.viewport.width;
        let height = frame.viewport.height;
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" preserveAspectRatio="xMinYMin meet""#
        )?;
        if let Some(id) = &self.element_id {
            write!(out, r#" id="{}""#, escape(id))?;
        }
        out.push_str(">\n");

        for path in &frame.paths {
            let mut d = String::new();
            for (index, (x, y)) in path.points.iter().enumerate() {
                let command = if index == 0 { 'M' } else { 'L' };
                write!(d, "{command}{}", point(*x, *y))?;
            }
            if path.closed {
                d.push('Z');
            }
            write!(out, r#"  <path d="{d}""#)?;
            match path.fill {
                Some(fill) => write_paint(out, "fill", fill)?,
                None => out.push_str(r#" fill="none""#),
            }
            if let Some((color, width)) = path.stroke {
                write_paint(out, "stroke", color)?;
                write!(out, r#" stroke-width="{}""#, num(width))?;
            }
            out.push_str("/>\n");
        }

        for rect in &frame.rects {
            write!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}""#,
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            )?;
            write_paint(out, "fill", rect.fill)?;
            if let Some((color, width)) = rect.stroke {
                write_paint(out, "stroke", color)?;
                write!(out, r#" stroke-width="{}""#, num(width))?;
            }
            out.push_str("/>\n");
        }

        for circle in &frame.circles {
            write!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}""#,
                num(circle.cx),
                num(circle.cy),
                num(circle.radius)
            )?;
            write_paint(out, "fill", circle.fill)?;
            out.push_str("/>\n");
        }

        for line in &frame.lines {
            write!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2),
                num(line.stroke_width)
            )?;
            write_paint(out, "stroke", line.color)?;
            out.push_str("/>\n");
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            write!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="{anchor}""#,
                num(text.x),
                num(text.y),
                num(text.font_size_px)
            )?;
            write_paint(out, "fill", text.color)?;
            writeln!(out, ">{}</text>", escape(&text.text))?;
        }

        out.push_str("</svg>\n");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::with_capacity(256 + frame.primitive_count() * 96);
        self.write_frame(frame, &mut document)
            .map_err(|_| ChartError::InvalidData("failed to serialize svg frame".to_owned()))?;

        self.document = document;
        self.last_stats = SvgRenderStats {
            paths_drawn: frame.paths.len(),
            rects_drawn: frame.rects.len(),
            circles_drawn: frame.circles.len(),
            lines_drawn: frame.lines.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }

    fn clear(&mut self) {
        self.document.clear();
        self.last_stats = SvgRenderStats::default();
    }
}

fn write_paint(out: &mut String, attribute: &str, color: Color) -> std::fmt::Result {
    write!(out, r#" {attribute}="{}""#, color.to_hex())?;
    if color.alpha < 1.0 {
        write!(out, r#" {attribute}-opacity="{}""#, num(color.alpha))?;
    }
    Ok(())
}

fn point(x: f64, y: f64) -> String {
    format!("{},{}", num(x), num(y))
}

/// Two decimals with trailing zeros removed.
fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
