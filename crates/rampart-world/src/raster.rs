//! Voxel line rasterization for block-line builds.

use glam::IVec3;

/// Maximum voxels a single block line may cover, endpoints inclusive.
/// Longer requests are truncated, matching the protocol's limit.
pub const MAX_LINE_BLOCKS: usize = 50;

/// Rounding division `a / b` for `b > 0`, halves rounded up.
fn round_div(a: i64, b: i64) -> i64 {
    (2 * a + b).div_euclid(2 * b)
}

/// Rasterize the voxel line from `start` to `end`, both inclusive.
///
/// Steps along the dominant axis so consecutive voxels are always adjacent
/// on that axis; the other two axes follow proportionally. The result is
/// capped at [`MAX_LINE_BLOCKS`].
pub fn block_line(start: IVec3, end: IVec3) -> Vec<IVec3> {
    let delta = (end - start).as_i64vec3();
    let steps = delta.abs().max_element();
    if steps == 0 {
        return vec![start];
    }

    let count = (steps as usize + 1).min(MAX_LINE_BLOCKS);
    let mut out = Vec::with_capacity(count);
    for t in 0..count as i64 {
        out.push(IVec3::new(
            start.x + round_div(delta.x * t, steps) as i32,
            start.y + round_div(delta.y * t, steps) as i32,
            start.z + round_div(delta.z * t, steps) as i32,
        ));
    }
    out
}
