use std::f64::consts::PI;

/// Edge length of the voxel grid used to show spatial encoding.
pub const GRID_SIZE: usize = 5;

/// Phases with a cosine above this are drawn as coherent.
const COHERENCE_THRESHOLD: f64 = 0.8;

/// Spin phase of one voxel of the encoding grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VoxelPhase {
    /// Unit: `rad`
    pub angle: f64,
    pub coherent: bool,
}

/// Phase imprinted on a `GRID_SIZE`² voxel grid centred on the isocentre by
/// the encoding gradients at k-space position `(kx, ky)`. Rows run along the
/// phase-encode axis (row 0 at the top), columns along the readout axis.
pub fn phase_grid(kx: f64, ky: f64) -> [[VoxelPhase; GRID_SIZE]; GRID_SIZE] {
    let center = (GRID_SIZE / 2) as f64;
    let mut grid = [[VoxelPhase::default(); GRID_SIZE]; GRID_SIZE];
    for (row, voxels) in grid.iter_mut().enumerate() {
        for (col, voxel) in voxels.iter_mut().enumerate() {
            let phase_part = -(row as f64 - center) * ky * PI;
            let freq_part = (col as f64 - center) * kx * PI;
            let angle = phase_part + freq_part;
            *voxel = VoxelPhase {
                angle,
                coherent: angle.cos() > COHERENCE_THRESHOLD,
            };
        }
    }
    grid
}
