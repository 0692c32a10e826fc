use glam::{IVec3, Mat4};
use prism_common::{CameraDemoConfig, MAX_GRID_HALF_EXTENT, Rgba};
use serde::Serialize;

use crate::transforms::{ObjectTransforms, ViewTransforms};

/// Cubic lattice of cubes around the origin, with the centre cell left empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeGrid {
    pub half_extent: i32,
    pub spacing: f32,
}

impl Default for CubeGrid {
    fn default() -> Self {
        Self {
            half_extent: 2,
            spacing: 2.5,
        }
    }
}

/// One cube draw: its cell, matrices, and colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubeInstance {
    pub cell: IVec3,
    pub transforms: ObjectTransforms,
    pub color: Rgba,
}

impl CubeGrid {
    /// Grid for an unvalidated config; the extent is capped at
    /// [`MAX_GRID_HALF_EXTENT`].
    pub fn from_config(config: &CameraDemoConfig) -> Self {
        let mut half_extent = config.grid_half_extent;
        if half_extent > MAX_GRID_HALF_EXTENT {
            tracing::warn!(
                requested = half_extent,
                max = MAX_GRID_HALF_EXTENT,
                "grid_half_extent capped"
            );
            half_extent = MAX_GRID_HALF_EXTENT;
        }
        Self {
            half_extent: half_extent as i32,
            spacing: config.grid_spacing,
        }
    }

    /// Number of cubes drawn per frame. Saturates at `usize::MAX - 1`.
    pub fn len(&self) -> usize {
        let side = (self.half_extent.max(0) as usize)
            .saturating_mul(2)
            .saturating_add(1);
        side.saturating_mul(side).saturating_mul(side) - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occupied cells, x outermost, z innermost.
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        let h = self.half_extent.max(0);
        (-h..=h)
            .flat_map(move |x| (-h..=h).flat_map(move |y| (-h..=h).map(move |z| IVec3::new(x, y, z))))
            .filter(|cell| *cell != IVec3::ZERO)
    }

    /// Channel brightness grows with distance from the centre along each axis.
    pub fn color_for(cell: IVec3) -> Rgba {
        let c = cell.abs().as_vec3() * 0.5;
        Rgba::new(c.x, c.y, c.z, 1.0).saturate()
    }

    pub fn world_for(&self, cell: IVec3) -> Mat4 {
        Mat4::from_translation(cell.as_vec3() * self.spacing)
    }

    pub fn instances(&self, view: &ViewTransforms) -> Vec<CubeInstance> {
        self.cells()
            .map(|cell| CubeInstance {
                cell,
                transforms: view.object(self.world_for(cell)),
                color: Self::color_for(cell),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn default_grid_has_124_cubes() {
        let grid = CubeGrid::default();
        assert_eq!(grid.len(), 124);
        assert_eq!(grid.cells().count(), 124);
    }

    #[test]
    fn centre_cell_is_skipped() {
        let grid = CubeGrid::default();
        assert!(grid.cells().all(|c| c != IVec3::ZERO));
    }

    #[test]
    fn zero_extent_grid_is_empty() {
        let grid = CubeGrid {
            half_extent: 0,
            spacing: 1.0,
        };
        assert!(grid.is_empty());
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn huge_extent_len_does_not_overflow() {
        let grid = CubeGrid {
            half_extent: i32::MAX,
            spacing: 1.0,
        };
        assert_eq!(grid.len(), usize::MAX - 1);
        assert!(!grid.is_empty());
    }

    #[test]
    fn from_config_caps_extent() {
        let config = CameraDemoConfig {
            grid_half_extent: 1_500_000_000,
            ..CameraDemoConfig::default()
        };
        let grid = CubeGrid::from_config(&config);
        assert_eq!(grid.half_extent, MAX_GRID_HALF_EXTENT as i32);
        assert_eq!(grid.len(), 65 * 65 * 65 - 1);
    }

    #[test]
    fn cell_order_is_x_major() {
        let grid = CubeGrid::default();
        let cells: Vec<_> = grid.cells().take(2).collect();
        assert_eq!(cells[0], IVec3::new(-2, -2, -2));
        assert_eq!(cells[1], IVec3::new(-2, -2, -1));
    }

    #[test]
    fn colors_follow_distance_from_centre() {
        assert_eq!(CubeGrid::color_for(IVec3::new(-2, 1, 0)), Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(CubeGrid::color_for(IVec3::new(5, 0, 0)).r, 1.0);
    }

    #[test]
    fn instances_are_spaced() {
        let grid = CubeGrid::default();
        let view = ViewTransforms::new(Mat4::IDENTITY, Mat4::IDENTITY);
        let instances = grid.instances(&view);
        assert_eq!(instances.len(), 124);
        let corner = instances
            .iter()
            .find(|i| i.cell == IVec3::new(2, -1, 1))
            .unwrap();
        let origin = corner.transforms.world.w_axis.truncate();
        assert!(origin.abs_diff_eq(Vec3::new(5.0, -2.5, 2.5), 1e-6));
        assert!(instances.iter().all(|i| i.transforms.is_finite()));
    }
}
