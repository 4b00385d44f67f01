// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `chartmaster_demo`.

use std::fmt::Write as _;

use chartmaster_charts::{Mark, Primitive, StrokeStyle, TextAnchor, TextBaseline, sort_marks};
use kurbo::{Affine, Rect};
use peniko::Brush;

/// Marks to draw, split into a layer that follows the view transform (series, axes) and a
/// fixed overlay (legend, annotations).
#[derive(Debug)]
pub(crate) struct SvgScene {
    view: Rect,
    background: Brush,
    transform: Affine,
    clip: Option<(Rect, String)>,
    content: Vec<Mark>,
    overlay: Vec<Mark>,
}

impl SvgScene {
    pub(crate) fn new(view: Rect, background: impl Into<Brush>) -> Self {
        Self {
            view,
            background: background.into(),
            transform: Affine::IDENTITY,
            clip: None,
            content: Vec::new(),
            overlay: Vec::new(),
        }
    }

    /// Applies `transform` to the content layer, clipped to `clip`. `id` must be unique
    /// within the page.
    pub(crate) fn set_view_transform(&mut self, transform: Affine, clip: Rect, id: &str) {
        self.transform = transform;
        self.clip = Some((clip, id.to_string()));
    }

    pub(crate) fn extend_content(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.content.extend(marks);
    }

    pub(crate) fn extend_overlay(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.overlay.extend(marks);
    }

    pub(crate) fn to_svg_string(&mut self) -> String {
        sort_marks(&mut self.content);
        sort_marks(&mut self.overlay);

        let v = self.view;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        );
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            v.x0,
            v.y0,
            v.width(),
            v.height()
        ));
        write_paint_attr(&mut out, "fill", &self.background);
        out.push_str("/>\n");

        if let Some((clip, id)) = &self.clip {
            let _ = writeln!(
                out,
                r#"<defs><clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
                clip.x0,
                clip.y0,
                clip.width(),
                clip.height()
            );
            let [a, b, c, d, e, f] = self.transform.as_coeffs();
            let _ = writeln!(
                out,
                r#"<g clip-path="url(#{id})"><g transform="matrix({a} {b} {c} {d} {e} {f})">"#
            );
        }
        for mark in &self.content {
            write_mark(&mut out, mark);
        }
        if self.clip.is_some() {
            out.push_str("</g></g>\n");
        }
        for mark in &self.overlay {
            write_mark(&mut out, mark);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.primitive {
        Primitive::Rect { rect, fill } => {
            let r = rect.abs();
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height(),
            ));
            write_paint_attr(out, "fill", fill);
        }
        Primitive::Circle {
            circle,
            fill,
            stroke,
        } => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                circle.center.x, circle.center.y, circle.radius
            ));
            write_optional_fill(out, fill.as_ref());
            write_stroke(out, stroke.as_ref());
        }
        Primitive::Segment { line, stroke } => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                line.p0.x, line.p0.y, line.p1.x, line.p1.y
            ));
            write_stroke(out, Some(stroke));
        }
        Primitive::Polyline { stroke, .. } => {
            out.push_str(&format!(r#"<path d="{}" fill="none""#, mark.primitive.to_path().to_svg()));
            write_stroke(out, Some(stroke));
        }
        Primitive::Polygon { fill, stroke, .. } => {
            out.push_str(&format!(r#"<path d="{}""#, mark.primitive.to_path().to_svg()));
            write_optional_fill(out, fill.as_ref());
            write_stroke(out, stroke.as_ref());
        }
        Primitive::Arc { fill, stroke, .. } => {
            out.push_str(&format!(r#"<path d="{}""#, mark.primitive.to_path().to_svg()));
            write_paint_attr(out, "fill", fill);
            write_stroke(out, stroke.as_ref());
        }
        Primitive::Label(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                t.anchor.x, t.anchor.y, t.font_size, baseline
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.anchor.x, t.anchor.y
                ));
            }
            out.push_str(match t.align {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
            return;
        }
    }
    if let Some(row) = mark.row_key {
        out.push_str(&format!(r#" data-row="{row}""#));
    }
    out.push_str("/>\n");
}

fn write_optional_fill(out: &mut String, fill: Option<&Brush>) {
    match fill {
        Some(brush) => write_paint_attr(out, "fill", brush),
        None => out.push_str(r#" fill="none""#),
    }
}

fn write_stroke(out: &mut String, stroke: Option<&StrokeStyle>) {
    if let Some(s) = stroke
        && s.stroke_width > 0.0
    {
        write_paint_attr(out, "stroke", &s.brush);
        out.push_str(&format!(r#" stroke-width="{}""#, s.stroke_width));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
