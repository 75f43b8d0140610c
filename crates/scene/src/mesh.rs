use std::f32::consts::TAU;

/// Sentinel index that terminates one triangle strip and begins another
/// within a single index buffer.
pub const PRIMITIVE_RESTART: u16 = 0xFFFF;

/// Geometry produced by the procedural generators, ready for GPU upload.
///
/// Positions, normals, and colors run parallel (one entry per vertex);
/// `indices` describes triangle strips split by [`PRIMITIVE_RESTART`]. The
/// math core never inspects this data; it flows straight to the upload path.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Cube with corners at (±1, ±1, ±1), drawn as two triangle strips.
    ///
    /// Eight shared corner vertices with smooth corner normals. `colors`
    /// supplies one RGBA color per corner, in the same order as the
    /// positions: x is the major axis, then y, then z.
    pub fn cube(colors: [[f32; 4]; 8]) -> Self {
        let mut positions = Vec::with_capacity(8);
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    positions.push([x, y, z]);
                }
            }
        }

        // A corner normal is the corner direction itself, normalized.
        let inv = 1.0 / 3.0_f32.sqrt();
        let normals = positions
            .iter()
            .map(|[x, y, z]| [x * inv, y * inv, z * inv])
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 3, 6, 7, 4, 5,     // first strip
            PRIMITIVE_RESTART,
            2, 6, 0, 4, 1, 5, 3, 7,     // second strip
        ];

        Self {
            positions,
            normals,
            colors: colors.to_vec(),
            indices,
        }
    }

    /// Cylinder of radius 1 along +Z, base at z = 0 and top at z = 1.
    ///
    /// `slices` is the number of points around each ring, `stacks` the
    /// number of layers along the axis; both are forced up to the smallest
    /// values that still enclose volume. The outer wall is one long strip
    /// walking ring pairs; each end cap is a zig-zag strip triangulation of
    /// its ring. Cap triangles reuse the wall vertices, so normals stay
    /// radial across the rim. Vertex colors are random, one per vertex.
    pub fn cylinder(slices: u16, stacks: u16) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(1);

        let mut positions = Vec::with_capacity(usize::from(slices) * usize::from(stacks + 1));
        let mut normals = Vec::with_capacity(positions.capacity());
        let step_out = 1.0 / f32::from(stacks);
        for stack in 0..=stacks {
            for slice in 0..slices {
                let theta = TAU * f32::from(slice) / f32::from(slices);
                positions.push([theta.cos(), theta.sin(), f32::from(stack) * step_out]);
                normals.push([theta.cos(), theta.sin(), 0.0]);
            }
        }

        let colors = (0..positions.len())
            .map(|_| {
                [
                    rand::random::<f32>(),
                    rand::random::<f32>(),
                    rand::random::<f32>(),
                    1.0,
                ]
            })
            .collect();

        // Outer wall: zig-zag between each ring and the one above it,
        // repeating the first pair to close the loop.
        let mut indices: Vec<u16> = Vec::new();
        indices.push(0);
        for stack in 0..stacks {
            indices.push((stack + 1) * slices);
            for slice in 1..slices {
                indices.push(slice + stack * slices);
                indices.push(slice + (stack + 1) * slices);
            }
            indices.push(stack * slices);
            indices.push((stack + 1) * slices);
        }

        indices.push(PRIMITIVE_RESTART);
        cap_indices(&mut indices, 0, slices);
        indices.push(PRIMITIVE_RESTART);
        cap_indices(&mut indices, stacks * slices, slices);

        Self {
            positions,
            normals,
            colors,
            indices,
        }
    }
}

// Strip-triangulate one end-cap ring, alternating between the two sides of
// the start vertex and finishing opposite it.
fn cap_indices(indices: &mut Vec<u16>, first: u16, slices: u16) {
    indices.push(first);
    let mut remaining = slices - 1;
    let mut offset = 1;
    let mut on_opposite_side = false;
    while remaining > 1 {
        if on_opposite_side {
            indices.push(first + slices - offset);
            offset += 1;
        } else {
            indices.push(first + offset);
        }
        on_opposite_side = !on_opposite_side;
        remaining -= 1;
    }
    indices.push(first + slices.div_ceil(2));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strips(mesh: &MeshData) -> Vec<Vec<u16>> {
        mesh.indices
            .split(|&i| i == PRIMITIVE_RESTART)
            .map(|s| s.to_vec())
            .collect()
    }

    #[test]
    fn cube_is_two_strips_over_eight_corners() {
        let mesh = MeshData::cube([[1.0, 0.0, 0.0, 1.0]; 8]);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.indices.len(), 17);
        assert_eq!(mesh.indices[8], PRIMITIVE_RESTART);

        let strips = strips(&mesh);
        assert_eq!(strips.len(), 2);
        for strip in &strips {
            assert_eq!(strip.len(), 8);
            assert!(strip.iter().all(|&i| usize::from(i) < mesh.vertex_count()));
        }
    }

    #[test]
    fn cube_normals_are_unit_corner_directions() {
        let mesh = MeshData::cube([[0.0, 0.0, 0.0, 1.0]; 8]);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-6);
            // Normal points the same way as the corner.
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn cylinder_counts_and_bounds() {
        let mesh = MeshData::cylinder(6, 2);
        assert_eq!(mesh.vertex_count(), 6 * 3);
        assert_eq!(mesh.colors.len(), mesh.vertex_count());
        assert_eq!(mesh.normals.len(), mesh.vertex_count());

        // Wall strip: 1 + stacks * (2 * slices + 1) indices, then two caps
        // of `slices` indices each, separated by restarts.
        assert_eq!(mesh.indices.len(), 27 + 1 + 6 + 1 + 6);
        assert!(mesh
            .indices
            .iter()
            .filter(|&&i| i != PRIMITIVE_RESTART)
            .all(|&i| usize::from(i) < mesh.vertex_count()));
    }

    #[test]
    fn cylinder_caps_zigzag_from_the_start_vertex() {
        let mesh = MeshData::cylinder(6, 2);
        let strips = strips(&mesh);
        assert_eq!(strips.len(), 3);
        assert_eq!(strips[1], vec![0, 1, 5, 2, 4, 3]);
        assert_eq!(strips[2], vec![12, 13, 17, 14, 16, 15]);
    }

    #[test]
    fn cylinder_spans_unit_length_along_z() {
        let mesh = MeshData::cylinder(8, 3);
        let first_ring = &mesh.positions[..8];
        let last_ring = &mesh.positions[8 * 3..];
        assert!(first_ring.iter().all(|p| p[2] == 0.0));
        assert!(last_ring.iter().all(|p| (p[2] - 1.0).abs() < 1e-6));
        // Every ring vertex sits on the unit circle.
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cylinder_clamps_degenerate_inputs() {
        let mesh = MeshData::cylinder(2, 0);
        // Forced up to 3 slices and 1 stack.
        assert_eq!(mesh.vertex_count(), 3 * 2);
        let strips = strips(&mesh);
        assert_eq!(strips.len(), 3);
        assert_eq!(strips[1], vec![0, 1, 2]);
    }

    #[test]
    fn cylinder_colors_are_opaque() {
        let mesh = MeshData::cylinder(6, 2);
        for c in &mesh.colors {
            assert_eq!(c[3], 1.0);
            assert!(c[..3].iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }
}
