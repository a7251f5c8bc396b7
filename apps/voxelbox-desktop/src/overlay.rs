//! egui drawing on top of the 3D frame: touch controls or crosshair, and the
//! inspector panel.

use egui::{Align2, Color32, Context as EguiContext, FontId, Pos2, Shape, Stroke};
use glam::Vec2;
use voxelbox_common::BlockType;
use voxelbox_input::{TouchLayout, TouchScheme, radial};
use voxelbox_persist::KvStore;
use voxelbox_session::Session;

const TRANSLUCENT_WHITE: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
const HIGHLIGHT: Color32 = Color32::from_rgba_premultiplied(90, 90, 90, 90);

fn pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

pub fn draw<S: KvStore>(ctx: &EguiContext, session: &Session<S>) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("hud"),
    ));

    match session.input().scheme().touch_controls() {
        Some(touch) => draw_touch_controls(&painter, touch, session.active_block()),
        None => draw_crosshair(&painter, ctx.screen_rect(), session.active_block()),
    }

    if session.show_inspector() {
        egui::SidePanel::left("inspector")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("voxelbox");
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.monospace(session.inspector_text());
                });
                ui.separator();
                ui.small("F1: Toggle Inspector | LMB: Place | RMB: Remove | Wheel: Block");
            });
    }
}

fn draw_crosshair(painter: &egui::Painter, screen: egui::Rect, active: BlockType) {
    let c = screen.center();
    let stroke = Stroke::new(2.0, Color32::WHITE);
    painter.line_segment([c - egui::vec2(8.0, 0.0), c + egui::vec2(8.0, 0.0)], stroke);
    painter.line_segment([c - egui::vec2(0.0, 8.0), c + egui::vec2(0.0, 8.0)], stroke);
    painter.text(
        Pos2::new(c.x, screen.bottom() - 30.0),
        Align2::CENTER_CENTER,
        active.name(),
        FontId::proportional(18.0),
        Color32::WHITE,
    );
}

fn draw_touch_controls(painter: &egui::Painter, touch: &TouchScheme, active: BlockType) {
    let layout = touch.layout();

    // Joystick
    let base = layout.joystick_center();
    painter.circle_filled(pos(base), TouchLayout::JOYSTICK_BASE_RADIUS, TRANSLUCENT_WHITE);
    painter.circle_filled(
        pos(base + touch.joystick().offset()),
        TouchLayout::JOYSTICK_STICK_RADIUS,
        HIGHLIGHT,
    );

    // Radial button
    let center = layout.radial_center();
    painter.circle_filled(pos(center), TouchLayout::RADIAL_BUTTON_RADIUS, HIGHLIGHT);
    painter.text(
        pos(center),
        Align2::CENTER_CENTER,
        active.name(),
        FontId::proportional(13.0),
        Color32::WHITE,
    );

    let selector = touch.radial();
    if !selector.is_open() {
        return;
    }

    painter.circle(
        pos(center),
        TouchLayout::RADIAL_MENU_RADIUS,
        TRANSLUCENT_WHITE,
        Stroke::new(1.0, Color32::WHITE),
    );
    let sectors = BlockType::COUNT;
    for (index, block) in BlockType::ALL.into_iter().enumerate() {
        let (start, end) = radial::sector_span(index, sectors);
        if block == selector.highlighted() {
            painter.add(Shape::convex_polygon(
                sector_polygon(center, start, end),
                HIGHLIGHT,
                Stroke::NONE,
            ));
        }
        painter.line_segment(
            [
                pos(center),
                pos(center + Vec2::from_angle(start) * TouchLayout::RADIAL_MENU_RADIUS),
            ],
            Stroke::new(1.0, Color32::WHITE),
        );
        let mid = (start + end) * 0.5;
        painter.text(
            pos(center + Vec2::from_angle(mid) * TouchLayout::RADIAL_LABEL_RADIUS),
            Align2::CENTER_CENTER,
            block.name(),
            FontId::proportional(14.0),
            Color32::WHITE,
        );
    }
}

/// Pie slice outline, centre first.
fn sector_polygon(center: Vec2, start: f32, end: f32) -> Vec<Pos2> {
    const STEPS: usize = 12;
    let mut points = Vec::with_capacity(STEPS + 2);
    points.push(pos(center));
    for i in 0..=STEPS {
        let angle = start + (end - start) * i as f32 / STEPS as f32;
        points.push(pos(center + Vec2::from_angle(angle) * TouchLayout::RADIAL_MENU_RADIUS));
    }
    points
}
