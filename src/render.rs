use egui::{Color32, Painter, Pos2, Shape, Stroke};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::{interaction::World, points::Position};

/// Drawing primitives the editor needs, in world coordinates
/// (window pixels, origin top left, y down).
pub trait Canvas {
    fn circle_filled(&mut self, center: Position, radius: f64, color: Color32);
    fn polyline(&mut self, points: &[Position], width: f64, color: Color32);
    /// Four corners per quad.
    fn quads(&mut self, vertices: &[Position], color: Color32);
}

/// Maps world coordinates onto the screen rect the canvas was allocated at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin: Pos2,
}

impl Viewport {
    pub fn new(origin: Pos2) -> Self {
        Self { origin }
    }
    pub fn to_screen(&self, position: Position) -> Pos2 {
        Pos2::new(self.origin.x + position.x as f32, self.origin.y + position.y as f32)
    }
    pub fn to_world(&self, pos: Pos2) -> Position {
        Position::new((pos.x - self.origin.x) as f64, (pos.y - self.origin.y) as f64)
    }
}

pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    viewport: Viewport,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, viewport: Viewport) -> Self {
        Self { painter, viewport }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn circle_filled(&mut self, center: Position, radius: f64, color: Color32) {
        self.painter.circle_filled(self.viewport.to_screen(center), radius as f32, color);
    }
    fn polyline(&mut self, points: &[Position], width: f64, color: Color32) {
        let line: Vec<Pos2> = points.iter().map(|p| self.viewport.to_screen(*p)).collect();
        self.painter.add(Shape::line(line, Stroke::new(width as f32, color)));
    }
    fn quads(&mut self, vertices: &[Position], color: Color32) {
        for quad in vertices.chunks_exact(4) {
            let corners = quad.iter().map(|p| self.viewport.to_screen(*p)).collect();
            self.painter.add(Shape::convex_polygon(corners, color, Stroke::NONE));
        }
    }
}

/// Headless canvas, world coordinates are pixmap pixels.
pub struct PixmapCanvas<'a> {
    pixmap: &'a mut Pixmap,
}

impl<'a> PixmapCanvas<'a> {
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Self { pixmap }
    }
}

fn paint_for(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = true;
    paint
}

impl Canvas for PixmapCanvas<'_> {
    fn circle_filled(&mut self, center: Position, radius: f64, color: Color32) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) else {
            return;
        };
        self.pixmap.fill_path(&path, &paint_for(color), FillRule::Winding, Transform::identity(), None);
    }
    fn polyline(&mut self, points: &[Position], width: f64, color: Color32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::with_capacity(points.len(), points.len());
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        // a lone move_to yields no path
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = tiny_skia::Stroke { width: width as f32, ..Default::default() };
        self.pixmap.stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }
    fn quads(&mut self, vertices: &[Position], color: Color32) {
        let paint = paint_for(color);
        for quad in vertices.chunks_exact(4) {
            let mut pb = PathBuilder::with_capacity(5, 5);
            pb.move_to(quad[0].x as f32, quad[0].y as f32);
            for p in &quad[1..] {
                pb.line_to(p.x as f32, p.y as f32);
            }
            pb.close();
            if let Some(path) = pb.finish() {
                self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Style {
    pub background: Color32,
    pub curve: Color32,
    pub curve_width: f64,
    pub point: Color32,
    pub highlight: Color32,
    pub banner: Color32,
    pub text: Color32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(230),
            curve: Color32::BLACK,
            curve_width: 1.0,
            point: Color32::BLACK,
            highlight: Color32::WHITE,
            banner: Color32::from_gray(200),
            text: Color32::BLACK,
        }
    }
}

pub fn draw_scene(canvas: &mut impl Canvas, world: &World, curve: &[Position], style: &Style) {
    if curve.len() >= 2 {
        canvas.polyline(curve, style.curve_width, style.curve);
    }
    for point in world.points.iter() {
        canvas.circle_filled(point.position, point.select_radius, style.point);
        if point.selected {
            canvas.circle_filled(point.position, point.select_radius * 3.0 / 4.0, style.highlight);
        }
    }
}

pub fn draw_banner(canvas: &mut impl Canvas, min: Position, max: Position, color: Color32) {
    let corners = [min, Position::new(max.x, min.y), max, Position::new(min.x, max.y)];
    canvas.quads(&corners, color);
}
