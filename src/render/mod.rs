// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output helpers for routed wires.
//!
//! Paths are emitted as SVG `points` attributes with coordinates rounded to whole pixels, plus a
//! plain one-line-per-wire text listing used by the CLI.

use crate::model::{ConnectionId, Panel, Point};
use crate::route::Router;

/// One visible wire ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedWire {
    pub connection_id: ConnectionId,
    pub color: String,
    pub manual: bool,
    pub points: Vec<Point>,
}

/// Resolves every visible wire in render order (source part id, then connection id).
pub fn render_wires(panel: &Panel, router: &mut Router) -> Vec<RenderedWire> {
    router
        .render_all(panel)
        .into_iter()
        .filter_map(|(connection_id, points)| {
            let conn = panel.connection(&connection_id)?;
            Some(RenderedWire {
                color: conn.color().to_owned(),
                manual: conn.is_manual(),
                connection_id,
                points,
            })
        })
        .collect()
}

fn push_coord(out: &mut String, buf: &mut itoa::Buffer, value: f64) {
    out.push_str(buf.format(value.round() as i64));
}

/// `"x,y x,y …"` with each coordinate rounded to the nearest integer.
pub fn svg_points(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut buf = itoa::Buffer::new();
    for (idx, p) in points.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        push_coord(&mut out, &mut buf, p.x);
        out.push(',');
        push_coord(&mut out, &mut buf, p.y);
    }
    out
}

fn xml_escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn svg_polyline(wire: &RenderedWire) -> String {
    format!(
        r#"<polyline data-connection="{}" points="{}" stroke="{}" fill="none"/>"#,
        xml_escape_attr(wire.connection_id.as_str()),
        svg_points(&wire.points),
        xml_escape_attr(&wire.color)
    )
}

/// A standalone SVG with the rails and every wire.
pub fn svg_document(panel: &Panel, wires: &[RenderedWire]) -> String {
    let size = panel.routing_bounds();
    let mut buf = itoa::Buffer::new();
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" width=""#);
    out.push_str(buf.format(size.w.round() as i64));
    out.push_str(r#"" height=""#);
    out.push_str(buf.format(size.h.round() as i64));
    out.push_str("\">\n");

    for rail_y in panel.rail_ys() {
        let rail = [Point::new(panel.rail_left(), rail_y), Point::new(panel.rail_right(), rail_y)];
        out.push_str(&format!(
            "  <polyline class=\"rail\" points=\"{}\" stroke=\"#9E9E9E\" fill=\"none\"/>\n",
            svg_points(&rail)
        ));
    }
    for wire in wires {
        out.push_str("  ");
        out.push_str(&svg_polyline(wire));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

/// `<connection id> <points>` per wire, manual wires marked with `*`.
pub fn text_listing(wires: &[RenderedWire]) -> String {
    let mut out = String::new();
    for wire in wires {
        out.push_str(wire.connection_id.as_str());
        if wire.manual {
            out.push('*');
        }
        out.push(' ');
        out.push_str(&svg_points(&wire.points));
        out.push('\n');
    }
    out
}
