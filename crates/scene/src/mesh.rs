use glam::Vec3;

/// Non-interleaved triangle-list geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Triangles as resolved vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from_array(self.positions[tri[0] as usize]),
                Vec3::from_array(self.positions[tri[1] as usize]),
                Vec3::from_array(self.positions[tri[2] as usize]),
            ]
        })
    }

    /// Append a flat-shaded triangle; the normal comes from the winding.
    fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let n = face_normal(a, b, c).to_array();
        for p in [a, b, c] {
            self.indices.push(self.positions.len() as u16);
            self.positions.push(p.to_array());
            self.normals.push(n);
        }
    }
}

/// Unit normal of a counter-clockwise triangle.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Cube with edge length 1 centred on the origin, flat normals per face.
pub fn cube_mesh() -> MeshBuffers {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]]),
        ([0.0, 0.0, -1.0], [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]]),
        ([1.0, 0.0, 0.0],  [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]]),
        ([-1.0, 0.0, 0.0], [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]]),
        ([0.0, 1.0, 0.0],  [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]]),
        ([0.0, -1.0, 0.0], [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]]),
    ];

    let mut mesh = MeshBuffers::default();
    for (normal, corners) in faces {
        let base = mesh.positions.len() as u16;
        for corner in corners {
            mesh.positions.push(corner);
            mesh.normals.push(normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

/// Square pyramid: base `[-1, 1]` on `y = 0`, apex at `(0, 1, 0)`.
///
/// Every triangle has its own three vertices so faces shade flat.
pub fn pyramid_mesh() -> MeshBuffers {
    let apex = Vec3::new(0.0, 1.0, 0.0);
    let nn = Vec3::new(-1.0, 0.0, -1.0);
    let pn = Vec3::new(1.0, 0.0, -1.0);
    let pp = Vec3::new(1.0, 0.0, 1.0);
    let np = Vec3::new(-1.0, 0.0, 1.0);

    let mut mesh = MeshBuffers::default();
    // base, facing -Y
    mesh.push_flat_triangle(nn, pn, pp);
    mesh.push_flat_triangle(nn, pp, np);
    // sides: -Z, +X, +Z, -X
    mesh.push_flat_triangle(pn, nn, apex);
    mesh.push_flat_triangle(pp, pn, apex);
    mesh.push_flat_triangle(np, pp, apex);
    mesh.push_flat_triangle(nn, np, apex);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's stored normals match its winding and point away from
    /// `centre`.
    fn assert_outward_ccw(mesh: &MeshBuffers, centre: Vec3) {
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.positions[i as usize]));
            let winding = face_normal(a, b, c);
            let centroid = (a + b + c) / 3.0;
            assert!(winding.dot(centroid - centre) > 0.0, "triangle {tri:?} faces inward");
            for i in tri {
                let stored = Vec3::from_array(mesh.normals[*i as usize]);
                assert!((stored.length() - 1.0).abs() < 1e-5);
                assert!(stored.abs_diff_eq(winding, 1e-5), "normal mismatch at {i}");
            }
        }
    }

    #[test]
    fn cube_counts() {
        let mesh = cube_mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.normals.len(), 24);
    }

    #[test]
    fn cube_faces_point_outward() {
        assert_outward_ccw(&cube_mesh(), Vec3::ZERO);
    }

    #[test]
    fn cube_has_unit_edges() {
        let mesh = cube_mesh();
        for p in &mesh.positions {
            assert!(p.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn pyramid_has_eighteen_vertices() {
        let mesh = pyramid_mesh();
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.index_count(), 18);
        assert_eq!(mesh.triangles().count(), 6);
    }

    #[test]
    fn pyramid_faces_point_outward() {
        // any point strictly inside the pyramid works as the reference
        assert_outward_ccw(&pyramid_mesh(), Vec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn pyramid_side_normals_match_slope() {
        let mesh = pyramid_mesh();
        let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
        // first side triangle starts at vertex 6
        assert!(Vec3::from_array(mesh.normals[6]).abs_diff_eq(expected, 1e-5));
        let base = Vec3::from_array(mesh.normals[0]);
        assert!(base.abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(n, Vec3::ZERO);
    }
}
