//! Painting and widgets for the EQ graph: grid, response curve, the
//! clickable region overlay and the resonance screen controls.

use crate::eq;
use crate::filter::Filter;
use crate::regions::{RegionBoard, RegionState};
use crate::response::{self, Geometry};
use egui::{Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Ui};

pub const ACCENT_COLOR: Color32 = Color32::from_rgb(0x84, 0xcc, 0x16);
pub const LINE_COLOR: Color32 = Color32::from_rgb(0xc7, 0xc0, 0xbf);

fn region_fill(state: RegionState) -> Color32 {
    match state {
        RegionState::Default => Color32::TRANSPARENT,
        RegionState::Hovered | RegionState::Selected => {
            Color32::from_rgba_unmultiplied(167, 243, 208, 26)
        }
        RegionState::Correct => Color32::from_rgba_unmultiplied(36, 69, 50, 77),
        RegionState::Wrong => Color32::from_rgba_unmultiplied(246, 94, 76, 51),
    }
}

/// Paint the grid and the combined response curve of `filters` into `rect`.
pub fn draw_graph(painter: &egui::Painter, rect: Rect, geo: &Geometry, filters: &[Filter]) {
    let origin = rect.min;
    let grid = match response::grid_lines(geo) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Failed to lay out graph grid: {}", e);
            return;
        }
    };

    let thin = Stroke::new(0.5, LINE_COLOR);
    for line in &grid.verticals {
        let x = origin.x + line.pos;
        painter.line_segment(
            [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
            thin,
        );
        painter.text(
            Pos2::new(x + 4.0, rect.max.y - 4.0),
            Align2::LEFT_BOTTOM,
            &line.label,
            FontId::proportional(10.0),
            LINE_COLOR,
        );
    }
    for line in &grid.horizontals {
        let y = origin.y + line.pos;
        painter.line_segment(
            [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
            thin,
        );
        painter.text(
            Pos2::new(rect.min.x + 4.0, y - 2.0),
            Align2::LEFT_BOTTOM,
            &line.label,
            FontId::proportional(10.0),
            LINE_COLOR,
        );
    }
    // the 0 dB line reads stronger than the rest of the grid
    let zero_y = origin.y + grid.zero_db_y;
    painter.line_segment(
        [
            Pos2::new(rect.min.x, zero_y),
            Pos2::new(rect.max.x, zero_y),
        ],
        Stroke::new(1.0, LINE_COLOR),
    );

    let points: Vec<Pos2> = response::sample_curve(filters, geo)
        .into_iter()
        .map(|p| Pos2::new(origin.x + p.x, origin.y + p.y))
        .collect();
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points, Stroke::new(4.0, ACCENT_COLOR)));
    }
}

/// Lay the clickable boost/cut regions over the graph and feed pointer
/// events back into the board. Inert after the reveal, since the board
/// drops every event then anyway.
pub fn region_overlay(ui: &mut Ui, rect: Rect, geo: &Geometry, board: &mut RegionBoard) {
    let zero_y = rect.min.y + eq::db_to_y(0.0, geo.height, geo.min_db, geo.max_db);

    let entries: Vec<(f32, f32, Filter, RegionState)> = board
        .overlay_regions()
        .map(|r| (r.left, r.width, r.filter, r.state))
        .collect();

    for (left, width, filter, state) in entries {
        let x = rect.min.x + left;
        // boost regions cover the top half of the band, cuts the bottom
        let region_rect = if filter.gain >= 0.0 {
            Rect::from_min_max(Pos2::new(x, rect.min.y), Pos2::new(x + width, zero_y))
        } else {
            Rect::from_min_max(Pos2::new(x, zero_y), Pos2::new(x + width, rect.max.y))
        };

        let id = ui.id().with((
            "region",
            filter.frequency.to_bits(),
            filter.gain.to_bits(),
        ));
        let resp = ui.interact(region_rect, id, Sense::click());

        if resp.hovered() {
            board.pointer_enter(&filter);
        } else {
            board.pointer_leave(&filter);
        }
        if resp.clicked() {
            board.click(&filter);
        }

        // repaint from the board's post-event state, not the stale entry
        let current = board
            .regions()
            .iter()
            .find(|r| r.filter == filter)
            .map(|r| r.state)
            .unwrap_or(state);
        let fill = region_fill(current);
        if fill != Color32::TRANSPARENT {
            ui.painter().rect_filled(region_rect, CornerRadius::ZERO, fill);
        }
        if !matches!(state, RegionState::Correct | RegionState::Wrong) {
            resp.on_hover_cursor(CursorIcon::PointingHand);
        }
    }
}

/// Sliders and drag values for the resonance screen's editable filters.
/// Returns true when anything changed.
pub fn resonance_controls(ui: &mut Ui, filters: &mut [Filter]) -> bool {
    let mut changed = false;

    if let Some(base) = filters.first().map(|f| f.frequency) {
        let mut base = base;
        ui.horizontal(|ui| {
            ui.label("Base frequency");
            if ui
                .add(egui::Slider::new(&mut base, 2000.0..=4000.0).step_by(10.0).suffix(" Hz"))
                .changed()
            {
                // odd harmonics, the classic resonance ladder
                for (i, filter) in filters.iter_mut().enumerate() {
                    filter.frequency = (base * (2 * i + 1) as f32).round();
                }
                changed = true;
            }
        });
    }

    for filter in filters.iter_mut() {
        ui.horizontal(|ui| {
            ui.label(format!("{} Hz", filter.frequency));
            ui.label("Q");
            if ui
                .add(egui::DragValue::new(&mut filter.q).speed(0.1).range(0.1..=40.0))
                .changed()
            {
                if !filter.q.is_finite() || filter.q <= 0.0 {
                    filter.q = 5.0;
                }
                changed = true;
            }
            ui.label("Gain");
            if ui
                .add(
                    egui::DragValue::new(&mut filter.gain)
                        .speed(0.1)
                        .range(-12.0..=12.0)
                        .suffix(" dB"),
                )
                .changed()
            {
                changed = true;
            }
        });
    }

    changed
}

/// `mm:ss` for the transport readout.
pub fn format_time(secs: f32) -> String {
    let total = secs.max(0.0) as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
