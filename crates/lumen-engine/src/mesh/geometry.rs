//! Static geometry tables.
//!
//! Positions are in normalized device / model space with +Y up.

use super::vertex::{ColorVertex, NormalVertex, PosVertex, TexVertex};

pub const ORANGE: [f32; 3] = [1.0, 0.5, 0.2];
pub const SKY_BLUE: [f32; 3] = [0.2, 0.5, 1.0];

/// A single point at the center of the screen.
pub const CENTER_POINT: [PosVertex; 1] = [PosVertex::new(0.0, 0.0, 0.0)];

/// Left half of the side-by-side triangle pair.
pub const LEFT_TRIANGLE: [PosVertex; 3] = [
    PosVertex::new(-0.9, -0.5, 0.0),
    PosVertex::new(0.0, -0.5, 0.0),
    PosVertex::new(-0.45, 0.5, 0.0),
];

/// Right half of the side-by-side triangle pair.
pub const RIGHT_TRIANGLE: [PosVertex; 3] = [
    PosVertex::new(0.0, -0.5, 0.0),
    PosVertex::new(0.9, -0.5, 0.0),
    PosVertex::new(0.45, 0.5, 0.0),
];

/// Triangle centered on the origin, apex up.
pub const TRIANGLE: [PosVertex; 3] = [
    PosVertex::new(-0.5, -0.5, 0.0),
    PosVertex::new(0.5, -0.5, 0.0),
    PosVertex::new(0.0, 0.5, 0.0),
];

/// Same triangle with red, green and blue corners.
pub const RGB_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),
    ColorVertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
    ColorVertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0]),
];

/// Textured quad, corners: top-right, bottom-right, bottom-left, top-left.
pub const QUAD: [TexVertex; 4] = [
    TexVertex::new([0.5, 0.5, 0.0], [1.0, 1.0]),
    TexVertex::new([0.5, -0.5, 0.0], [1.0, 0.0]),
    TexVertex::new([-0.5, -0.5, 0.0], [0.0, 0.0]),
    TexVertex::new([-0.5, 0.5, 0.0], [0.0, 1.0]),
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

const fn cv(x: f32, y: f32, z: f32, r: f32, g: f32, b: f32) -> ColorVertex {
    ColorVertex::new([x, y, z], [r, g, b])
}

/// Unit cube (half-extent 0.5) as 36 non-indexed vertices with per-corner colors.
pub const COLORED_CUBE: [ColorVertex; 36] = [
    // back
    cv(-0.5, -0.5, -0.5, 0.0, 0.0, 0.0),
    cv(0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
    cv(0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    cv(0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    cv(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
    cv(-0.5, -0.5, -0.5, 0.0, 0.0, 0.0),
    // front
    cv(-0.5, -0.5, 0.5, 0.0, 0.0, 0.0),
    cv(0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
    cv(0.5, 0.5, 0.5, 1.0, 1.0, 0.0),
    cv(0.5, 0.5, 0.5, 1.0, 1.0, 0.0),
    cv(-0.5, 0.5, 0.5, 0.0, 1.0, 0.0),
    cv(-0.5, -0.5, 0.5, 0.0, 0.0, 0.0),
    // left
    cv(-0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    cv(-0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    cv(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    cv(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    cv(-0.5, -0.5, 0.5, 0.0, 0.0, 0.0),
    cv(-0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    // right
    cv(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    cv(0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    cv(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    cv(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    cv(0.5, -0.5, 0.5, 0.0, 0.0, 0.0),
    cv(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    // bottom
    cv(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    cv(0.5, -0.5, -0.5, 1.0, 1.0, 0.0),
    cv(0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
    cv(0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
    cv(-0.5, -0.5, 0.5, 0.0, 0.0, 0.0),
    cv(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
    // top
    cv(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
    cv(0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
    cv(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    cv(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    cv(-0.5, 0.5, 0.5, 0.0, 0.0, 0.0),
    cv(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
];

/// Axis-aligned cube with flat per-face normals, 36 vertices.
pub fn lit_cube(half_extent: f32) -> Vec<NormalVertex> {
    // (normal, two in-plane axes); corners are emitted as two CCW triangles.
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-1.0, -1.0),
        (1.0, -1.0),
        (1.0, 1.0),
        (1.0, 1.0),
        (-1.0, 1.0),
        (-1.0, -1.0),
    ];

    let h = half_extent;
    let mut out = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        for (a, b) in CORNERS {
            let p = [
                (n[0] + u[0] * a + v[0] * b) * h,
                (n[1] + u[1] * a + v[1] * b) * h,
                (n[2] + u[2] * a + v[2] * b) * h,
            ];
            out.push(NormalVertex::new(p, n));
        }
    }
    out
}

/// Square ground plane at `y = 0`, normal +Y, 6 vertices.
pub fn ground_plane(half_extent: f32) -> [NormalVertex; 6] {
    let h = half_extent;
    let up = [0.0, 1.0, 0.0];
    [
        NormalVertex::new([-h, 0.0, -h], up),
        NormalVertex::new([-h, 0.0, h], up),
        NormalVertex::new([h, 0.0, h], up),
        NormalVertex::new([h, 0.0, h], up),
        NormalVertex::new([h, 0.0, -h], up),
        NormalVertex::new([-h, 0.0, -h], up),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    // ── 2D tables ─────────────────────────────────────────────────────────

    #[test]
    fn side_by_side_triangles_do_not_overlap() {
        let left_max = LEFT_TRIANGLE.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let right_min = RIGHT_TRIANGLE.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert!(left_max <= right_min);
    }

    #[test]
    fn quad_indices_cover_all_corners() {
        let mut seen = [false; 4];
        for i in QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn quad_uvs_span_unit_square() {
        for v in QUAD {
            for c in v.uv {
                assert!(c == 0.0 || c == 1.0);
            }
        }
    }

    #[test]
    fn rgb_triangle_corners_are_primaries() {
        let colors: Vec<_> = RGB_TRIANGLE.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    // ── cubes ─────────────────────────────────────────────────────────────

    #[test]
    fn colored_cube_is_unit_sized() {
        for v in COLORED_CUBE {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn lit_cube_has_36_vertices_on_surface() {
        let cube = lit_cube(1.0);
        assert_eq!(cube.len(), 36);
        for v in &cube {
            // every vertex is a corner of the cube
            assert!(v.position.iter().all(|c| (c.abs() - 1.0).abs() < 1e-6));
        }
    }

    #[test]
    fn lit_cube_normals_point_outward() {
        for tri in lit_cube(1.0).chunks(3) {
            let n = tri[0].normal;
            let centroid = [
                (tri[0].position[0] + tri[1].position[0] + tri[2].position[0]) / 3.0,
                (tri[0].position[1] + tri[1].position[1] + tri[2].position[1]) / 3.0,
                (tri[0].position[2] + tri[1].position[2] + tri[2].position[2]) / 3.0,
            ];
            assert!(dot(n, centroid) > 0.0);
        }
    }

    #[test]
    fn lit_cube_winding_is_counter_clockwise_from_outside() {
        for tri in lit_cube(0.5).chunks(3) {
            let face_n = cross(
                sub(tri[1].position, tri[0].position),
                sub(tri[2].position, tri[0].position),
            );
            assert!(dot(face_n, tri[0].normal) > 0.0);
        }
    }

    #[test]
    fn ground_plane_is_flat_and_faces_up() {
        let plane = ground_plane(10.0);
        for v in plane {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
        for tri in plane.chunks(3) {
            let n = cross(
                sub(tri[1].position, tri[0].position),
                sub(tri[2].position, tri[0].position),
            );
            assert!(n[1] > 0.0);
        }
    }
}
