//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in pixel space (origin top-left,
//! y down). The pipeline maps pixels to clip space.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::scene::{DrawCommand, Scene};
use super::vertex::Vertex;
use crate::assets::{CardAtlas, UvRect};
use crate::layout::Rect;

/// Segments per rounded corner
pub const CORNER_SEGMENTS: u32 = 4;
/// Segments for full circles and glyph arcs
pub const CIRCLE_SEGMENTS: u32 = 24;

fn push_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    // a-b-c-d in winding order
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

/// Perimeter of a rounded rectangle, clockwise from the top-left corner.
/// Always `(segments + 1) * 4` points so two paths can be stitched.
fn rounded_path(rect: Rect, radius: f32, segments: u32) -> Vec<Vec2> {
    let r = radius.clamp(0.0, rect.size.x.min(rect.size.y) / 2.0);
    let (min, max) = (rect.min, rect.max());
    let centers = [
        Vec2::new(min.x + r, min.y + r),
        Vec2::new(max.x - r, min.y + r),
        Vec2::new(max.x - r, max.y - r),
        Vec2::new(min.x + r, max.y - r),
    ];

    let mut points = Vec::with_capacity(((segments + 1) * 4) as usize);
    for (k, center) in centers.iter().enumerate() {
        let start = PI + k as f32 * FRAC_PI_2;
        for i in 0..=segments {
            let theta = start + (i as f32 / segments as f32) * FRAC_PI_2;
            points.push(*center + r * Vec2::new(theta.cos(), theta.sin()));
        }
    }
    points
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick arc band from `theta_start` to `theta_end`
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = theta_end - theta_start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = theta_start + (i as f32 / segments as f32) * span;
        let theta2 = theta_start + ((i + 1) as f32 / segments as f32) * span;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        push_quad(
            &mut vertices,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * outer_radius,
            center + dir2 * inner_radius,
            color,
        );
    }

    vertices
}

/// Filled rounded rectangle (fan from the center; the shape is convex)
pub fn rounded_rect(rect: Rect, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let path = rounded_path(rect, radius, segments);
    let center = rect.center();
    let mut vertices = Vec::with_capacity(path.len() * 3);

    for (i, p) in path.iter().enumerate() {
        let next = path[(i + 1) % path.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p.x, p.y, color));
        vertices.push(Vertex::new(next.x, next.y, color));
    }

    vertices
}

/// Rounded outline drawn inward from `rect`
pub fn rounded_outline(
    rect: Rect,
    thickness: f32,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let thickness = thickness.clamp(0.0, rect.size.x.min(rect.size.y) / 2.0);
    let outer = rounded_path(rect, radius, segments);
    let inner = rounded_path(rect.expand(-thickness), (radius - thickness).max(0.0), segments);
    let mut vertices = Vec::with_capacity(outer.len() * 6);

    for i in 0..outer.len() {
        let j = (i + 1) % outer.len();
        push_quad(&mut vertices, outer[i], outer[j], inner[j], inner[i], color);
    }

    vertices
}

/// Atlas-textured quad, art rotated by counter-clockwise quarter turns
pub fn textured_quad(rect: Rect, uv: UvRect, quarter_turns: u8, alpha: f32) -> Vec<Vertex> {
    let [u0, v0, u1, v1] = uv;
    let (min, max) = (rect.min, rect.max());
    // Corners in TL, TR, BR, BL order for both positions and UVs
    let corners = [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ];
    let uvs = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];
    let tint = [1.0, 1.0, 1.0, alpha.clamp(0.0, 1.0)];

    // Turning the art CCW shows the source's next corner at each position
    let k = quarter_turns as usize % 4;
    let vertex = |i: usize| Vertex::textured(corners[i].x, corners[i].y, uvs[(i + k) % 4], tint);

    vec![
        vertex(0),
        vertex(1),
        vertex(2),
        vertex(0),
        vertex(2),
        vertex(3),
    ]
}

/// Face-down "?" glyph fitting in a `size` square around `center`
pub fn question_mark(center: Vec2, size: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let stroke = size * 0.08;
    let hook_radius = size * 0.18;
    let hook_center = center - Vec2::new(0.0, size * 0.15);

    // Hook: from the left, over the top, down to the bottom of its circle
    let mut vertices = arc_band(
        hook_center,
        hook_radius - stroke / 2.0,
        hook_radius + stroke / 2.0,
        PI,
        2.5 * PI,
        color,
        segments,
    );

    let stem_top = hook_center.y + hook_radius - stroke / 2.0;
    let stem_bottom = center.y + size * 0.15;
    push_quad(
        &mut vertices,
        Vec2::new(center.x - stroke / 2.0, stem_top),
        Vec2::new(center.x + stroke / 2.0, stem_top),
        Vec2::new(center.x + stroke / 2.0, stem_bottom),
        Vec2::new(center.x - stroke / 2.0, stem_bottom),
        color,
    );

    vertices.extend(circle(
        center + Vec2::new(0.0, size * 0.3),
        size * 0.06,
        color,
        segments / 2,
    ));

    vertices
}

/// Tessellate a scene. Cards whose art is missing from the atlas are skipped.
pub fn scene_vertices(scene: &Scene, atlas: &CardAtlas) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for command in &scene.commands {
        match *command {
            DrawCommand::RoundedRect {
                rect,
                radius,
                color,
            } => vertices.extend(rounded_rect(rect, radius, color, CORNER_SEGMENTS)),
            DrawCommand::Card {
                value,
                orientation,
                rect,
                alpha,
                ..
            } => match atlas.uv_rect(value) {
                Some(uv) => {
                    vertices.extend(textured_quad(rect, uv, orientation.quarter_turns(), alpha))
                }
                None => log::trace!("no art for card {}", value),
            },
            DrawCommand::Placeholder {
                center,
                size,
                color,
            } => vertices.extend(question_mark(center, size, color, CIRCLE_SEGMENTS)),
            DrawCommand::Border {
                rect,
                thickness,
                radius,
                color,
            } => vertices.extend(rounded_outline(
                rect,
                thickness,
                radius,
                color,
                CORNER_SEGMENTS,
            )),
        }
    }

    vertices
}
