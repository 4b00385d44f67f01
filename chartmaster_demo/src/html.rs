// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of demo sections.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One titled section of the report.
#[derive(Debug)]
pub(crate) struct Section {
    pub(crate) title: String,
    /// Raw SVG or HTML markup.
    pub(crate) body: String,
    /// Plain-text notes shown under the body.
    pub(crate) notes: Vec<String>,
}

pub(crate) fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let title = escape_xml(title);
    let _ = write!(
        out,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\n\
         <style>body{{font-family:sans-serif;margin:24px;background:#F3F4F6}}\
         section{{background:#fff;border:1px solid #E5E7EB;border-radius:8px;\
         padding:16px;margin-bottom:24px;display:inline-block;vertical-align:top;margin-right:24px}}\
         table{{border-collapse:collapse}}td,th{{border:1px solid #E5E7EB;padding:4px 8px}}\
         pre{{color:#4B5563}}</style>\n</head><body>\n<h1>{title}</h1>\n"
    );
    for section in sections {
        let _ = writeln!(out, "<section><h2>{}</h2>", escape_xml(&section.title));
        out.push_str(&section.body);
        if !section.notes.is_empty() {
            out.push_str("<pre>");
            for note in &section.notes {
                out.push_str(&escape_xml(note));
                out.push('\n');
            }
            out.push_str("</pre>");
        }
        out.push_str("</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
