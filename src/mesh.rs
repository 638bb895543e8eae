//! Textured triangle mesh over a landmark set.
//!
//! Construction follows a subdivision-style workflow: points inside the image
//! rectangle are inserted into a vertex table (near-duplicates collapse onto
//! the vertex already there), the table is Delaunay-triangulated, and every
//! triangle corner is mapped back to the landmark it came from. Triangles
//! that cannot be mapped back are logged and dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::types::{Point, Rect};

/// Points closer than this (in pixels) are inserted as one vertex.
pub const NEAR_DUPLICATE_DISTANCE: f64 = 1e-3;

/// How texture coordinates relate to vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TexCoords {
    /// Vertex divided by the image size, in [0, 1].
    #[default]
    Normalized,
    /// Same as the vertex, in pixels (rectangle textures).
    Pixels,
}

/// Triangle mesh with one texture coordinate per vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<Point>,
    tex_coords: Vec<Point>,
    /// Flat list, three indices per triangle.
    indices: Vec<usize>,
}

impl Mesh {
    /// Delaunay mesh over `points`, clipped to `rect`.
    ///
    /// Every point becomes a mesh vertex, in order, but only points inside
    /// `rect` take part in the triangulation.
    pub fn delaunay(points: &[Point], rect: Rect, tex_coords: TexCoords) -> Self {
        let mut subdiv = Subdivision::default();
        let mut point_of_vertex: HashMap<usize, usize> = HashMap::new();
        let mut skipped = 0usize;

        for (i, &p) in points.iter().enumerate() {
            if rect.contains(p) {
                let id = subdiv.insert(p);
                point_of_vertex.entry(id).or_insert(i);
            } else {
                skipped += 1;
            }
        }

        let triangulation = delaunator::triangulate(&subdiv.vertices);

        let (sx, sy) = match tex_coords {
            TexCoords::Normalized => (rect.width, rect.height),
            TexCoords::Pixels => (1.0, 1.0),
        };
        let mut mesh = Mesh {
            vertices: points.to_vec(),
            tex_coords: points.iter().map(|p| p.div_components(sx, sy)).collect(),
            indices: Vec::with_capacity(triangulation.triangles.len()),
        };

        let mut dropped = 0usize;
        for ids in triangulation.triangles.chunks_exact(3) {
            match resolve_triangle(ids, &point_of_vertex, &mesh.vertices, &rect) {
                Some(tri) => mesh.indices.extend_from_slice(&tri),
                None => dropped += 1,
            }
        }

        debug!(
            points = points.len(),
            inserted = subdiv.vertices.len(),
            outside = skipped,
            triangles = mesh.num_triangles(),
            dropped,
            "built landmark mesh"
        );

        mesh
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn tex_coords(&self) -> &[Point] {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn triangle_points(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.triangles()
            .map(|[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }
}

/// Vertex table fed to the triangulator.
#[derive(Default)]
struct Subdivision {
    vertices: Vec<delaunator::Point>,
}

impl Subdivision {
    /// Insert a point and return its vertex id. A near-duplicate of an
    /// existing vertex returns that vertex's id instead.
    fn insert(&mut self, p: Point) -> usize {
        let q = delaunator::Point {
            x: p.x as f64,
            y: p.y as f64,
        };
        let limit = NEAR_DUPLICATE_DISTANCE * NEAR_DUPLICATE_DISTANCE;
        if let Some(id) = self.vertices.iter().position(|v| {
            let dx = v.x - q.x;
            let dy = v.y - q.y;
            dx * dx + dy * dy <= limit
        }) {
            return id;
        }
        self.vertices.push(q);
        self.vertices.len() - 1
    }
}

/// Map the three vertex ids of a triangle back to mesh vertex indices.
///
/// Returns `None`, after logging, if any corner has no landmark or falls
/// outside `rect`.
fn resolve_triangle(
    ids: &[usize],
    point_of_vertex: &HashMap<usize, usize>,
    vertices: &[Point],
    rect: &Rect,
) -> Option<[usize; 3]> {
    if ids.len() != 3 {
        error!(corners = ids.len(), "malformed triangle in delaunay output");
        return None;
    }

    let mut tri = [0usize; 3];
    for (slot, &id) in tri.iter_mut().zip(ids) {
        let Some(&idx) = point_of_vertex.get(&id) else {
            error!(vertex = id, "can't find subdivision vertex in image mesh vertices");
            return None;
        };
        match vertices.get(idx) {
            Some(&p) if rect.contains(p) => *slot = idx,
            _ => {
                error!(vertex = id, index = idx, "subdivision vertex maps outside the image mesh");
                return None;
            }
        }
    }
    Some(tri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize, spacing: f32) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..n {
            for x in 0..n {
                // Jitter breaks the co-circular ties of a perfect grid.
                let jitter = ((x * 7 + y * 13) % 5) as f32 * 0.1;
                points.push(Point::new(
                    10.0 + x as f32 * spacing + jitter,
                    10.0 + y as f32 * spacing - jitter,
                ));
            }
        }
        points
    }

    #[test]
    fn square_gives_two_triangles() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ];
        let mesh = Mesh::delaunay(&points, Rect::from_size(100, 100), TexCoords::Normalized);

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        let mut used: Vec<usize> = mesh.indices().to_vec();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3]);
    }

    #[test]
    fn triangles_reference_valid_in_rect_vertices() {
        let rect = Rect::from_size(100, 100);
        let mut points = grid(6, 15.0);
        // Two points outside the image.
        points.push(Point::new(-5.0, 50.0));
        points.push(Point::new(50.0, 140.0));
        let outside = [points.len() - 2, points.len() - 1];

        let mesh = Mesh::delaunay(&points, rect, TexCoords::Pixels);

        assert_eq!(mesh.num_vertices(), points.len());
        assert!(mesh.num_triangles() > 0);
        for tri in mesh.triangles() {
            for idx in tri {
                assert!(idx < mesh.num_vertices());
                assert!(rect.contains(mesh.vertices()[idx]));
                assert!(!outside.contains(&idx));
            }
        }

        // n inserted points yield at most 2n - 5 triangles.
        let inserted = points.len() - outside.len();
        assert!(mesh.num_triangles() <= 2 * inserted - 5);
    }

    #[test]
    fn near_duplicates_collapse() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(50.0, 80.0),
            Point::new(50.0, 80.0000001),
        ];
        let mesh = Mesh::delaunay(&points, Rect::from_size(100, 100), TexCoords::Normalized);

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 1);
        let mut tri = mesh.triangles().next().unwrap();
        tri.sort_unstable();
        // The first of the duplicates keeps the vertex.
        assert_eq!(tri, [0, 1, 2]);
    }

    #[test]
    fn too_few_points_gives_empty_mesh() {
        let points = vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)];
        let mesh = Mesh::delaunay(&points, Rect::from_size(100, 100), TexCoords::Normalized);
        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(mesh.num_triangles(), 0);
    }

    #[test]
    fn tex_coords_modes() {
        let points = vec![Point::new(50.0, 25.0), Point::new(0.0, 0.0)];
        let rect = Rect::from_size(200, 100);

        let normalized = Mesh::delaunay(&points, rect, TexCoords::Normalized);
        assert_eq!(normalized.tex_coords(), &[Point::new(0.25, 0.25), Point::new(0.0, 0.0)]);

        let pixels = Mesh::delaunay(&points, rect, TexCoords::Pixels);
        assert_eq!(pixels.tex_coords(), pixels.vertices());
    }

    #[test]
    fn unresolved_vertex_drops_triangle() {
        let rect = Rect::from_size(100, 100);
        let vertices = vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 20.0),
        ];
        let map: HashMap<usize, usize> = [(0, 0), (1, 1)].into_iter().collect();

        assert_eq!(resolve_triangle(&[0, 1, 2], &map, &vertices, &rect), None);

        let map: HashMap<usize, usize> = [(0, 0), (1, 1), (2, 2)].into_iter().collect();
        assert_eq!(
            resolve_triangle(&[2, 0, 1], &map, &vertices, &rect),
            Some([2, 0, 1])
        );

        // A mapping past the end of the vertex list is rejected too.
        let map: HashMap<usize, usize> = [(0, 0), (1, 1), (2, 7)].into_iter().collect();
        assert_eq!(resolve_triangle(&[0, 1, 2], &map, &vertices, &rect), None);
    }

    #[test]
    fn subdivision_insert_dedups() {
        let mut subdiv = Subdivision::default();
        assert_eq!(subdiv.insert(Point::new(1.0, 1.0)), 0);
        assert_eq!(subdiv.insert(Point::new(2.0, 1.0)), 1);
        assert_eq!(subdiv.insert(Point::new(1.0, 1.0)), 0);
        assert_eq!(subdiv.vertices.len(), 2);
    }
}
