//! Drawing helpers for previewing outlines and meshes on an RGBA image.
//!
//! Everything clips to the image; off-image coordinates are simply skipped.

use image::{Rgba, RgbaImage};

use crate::mesh::Mesh;
use crate::polyline::Polyline;
use crate::types::Point;

pub fn draw_polyline(img: &mut RgbaImage, polyline: &Polyline, color: Rgba<u8>) {
    for (a, b) in polyline.segments() {
        draw_segment(img, a, b, color);
    }
}

/// Wireframe of every triangle in the mesh.
pub fn draw_mesh(img: &mut RgbaImage, mesh: &Mesh, color: Rgba<u8>) {
    for [a, b, c] in mesh.triangle_points() {
        draw_segment(img, a, b, color);
        draw_segment(img, b, c, color);
        draw_segment(img, c, a, color);
    }
}

pub fn draw_points(img: &mut RgbaImage, points: &[Point], radius: i32, color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    let r = radius.max(0) as f64;
    for p in points {
        let (x, y) = (p.x as f64, p.y as f64);
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        // A dot that cannot reach the image is skipped before any integer cast.
        if x < -r - 1.0 || y < -r - 1.0 || x > img_w as f64 + r || y > img_h as f64 + r {
            continue;
        }
        draw_circle(img, x.round() as i64, y.round() as i64, radius as i64, color);
    }
}

/// Clip the segment to the image, then rasterize what is left.
fn draw_segment(img: &mut RgbaImage, a: Point, b: Point, color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return;
    }
    let max_x = (img_w - 1) as f64;
    let max_y = (img_h - 1) as f64;
    let Some(((x0, y0), (x1, y1))) = clip_segment(
        (a.x as f64, a.y as f64),
        (b.x as f64, b.y as f64),
        max_x,
        max_y,
    ) else {
        return;
    };
    draw_line(
        img,
        x0.round() as i64,
        y0.round() as i64,
        x1.round() as i64,
        y1.round() as i64,
        color,
    );
}

/// Liang-Barsky clip of segment `a`-`b` against `[0, max_x] x [0, max_y]`.
///
/// Returns `None` for non-finite input or a segment entirely outside.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    max_x: f64,
    max_y: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [(-dx, a.0), (dx, max_x - a.0), (-dy, a.1), (dy, max_y - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else if r < t0 {
                return None;
            } else {
                t1 = t1.min(r);
            }
        }
    }

    let start = (a.0 + t0 * dx, a.1 + t0 * dy);
    let end = (a.0 + t1 * dx, a.1 + t1 * dy);
    Some((clamp_to(start, max_x, max_y), clamp_to(end, max_x, max_y)))
}

/// Absorb rounding drift at the clip boundary.
fn clamp_to(p: (f64, f64), max_x: f64, max_y: f64) -> (f64, f64) {
    (p.0.clamp(0.0, max_x), p.1.clamp(0.0, max_y))
}

fn put_clipped(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    if x >= 0 && x < img_w as i64 && y >= 0 && y < img_h as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_circle(img: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_clipped(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham line between two pixel positions, endpoints included.
fn draw_line(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        put_clipped(img, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
