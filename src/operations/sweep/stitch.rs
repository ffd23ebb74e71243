use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::mirror_triangles;
use crate::tessellation::to_index;

/// Builds the triangle index buffer for a lofted vertex buffer.
///
/// Side faces join each ring to the next, loop by loop. When the path is open
/// and not open-ended, cap triangles are indexed against the two end-profile
/// blocks the loft appends: the mirrored cap on the first block, the cap as
/// given on the last.
pub struct Stitch<'a> {
    ring_count: usize,
    profile_vertex_count: usize,
    closed_loop: bool,
    open_ended: bool,
    loops: Option<&'a [usize]>,
    caps: Option<&'a [[u32; 3]]>,
}

impl<'a> Stitch<'a> {
    /// Creates a new `Stitch` operation for an open, capped path whose profile
    /// is a single loop.
    #[must_use]
    pub fn new(ring_count: usize, profile_vertex_count: usize) -> Self {
        Self {
            ring_count,
            profile_vertex_count,
            closed_loop: false,
            open_ended: false,
            loops: None,
            caps: None,
        }
    }

    /// Wraps the last ring back to the first.
    #[must_use]
    pub fn closed_loop(mut self, closed_loop: bool) -> Self {
        self.closed_loop = closed_loop;
        self
    }

    /// Omits cap triangles.
    #[must_use]
    pub fn open_ended(mut self, open_ended: bool) -> Self {
        self.open_ended = open_ended;
        self
    }

    /// Splits each ring into loops of the given sizes (outer boundary, holes).
    #[must_use]
    pub fn loops(mut self, loops: &'a [usize]) -> Self {
        self.loops = Some(loops);
        self
    }

    /// Uses the given profile triangulation for the caps instead of a fan.
    #[must_use]
    pub fn caps(mut self, caps: &'a [[u32; 3]]) -> Self {
        self.caps = Some(caps);
        self
    }

    /// Executes the stitching.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if there are no rings, a loop
    /// has fewer than 3 vertices, the loop sizes do not add up to the profile
    /// vertex count, or a cap index is out of range; and a tessellation error
    /// if the index space exceeds `u32`.
    pub fn execute(&self) -> Result<Vec<[u32; 3]>> {
        let p = self.profile_vertex_count;
        if self.ring_count == 0 {
            return Err(OperationError::InvalidInput("stitching needs at least one ring".into()).into());
        }

        let single = [p];
        let loops = self.loops.unwrap_or(&single);
        if loops.iter().sum::<usize>() != p {
            return Err(OperationError::InvalidInput(format!(
                "loop sizes {loops:?} do not add up to {p} profile vertices"
            ))
            .into());
        }
        if let Some(&n) = loops.iter().find(|&&n| n < 3) {
            return Err(OperationError::InvalidInput(format!(
                "every loop needs at least 3 vertices, got {n}"
            ))
            .into());
        }

        let capped = !self.closed_loop && !self.open_ended;
        let blocks = self.ring_count + if capped { 2 } else { 0 };
        to_index(blocks * p)?;

        let pairs = if self.closed_loop { self.ring_count } else { self.ring_count - 1 };
        let mut indices = Vec::with_capacity(pairs * p * 2);

        for i in 0..pairs {
            let curr = i * p;
            let next = ((i + 1) % self.ring_count) * p;
            let mut start = 0;
            for &len in loops {
                for k in 0..len {
                    let j = start + k;
                    let j_next = start + (k + 1) % len;
                    let a = to_index(curr + j)?;
                    let b = to_index(curr + j_next)?;
                    let c = to_index(next + j_next)?;
                    let d = to_index(next + j)?;
                    indices.push([a, b, d]);
                    indices.push([b, c, d]);
                }
                start += len;
            }
        }

        if capped {
            let cap = match self.caps {
                Some(caps) => {
                    if let Some(bad) = caps.iter().flatten().find(|&&i| i as usize >= p) {
                        return Err(OperationError::InvalidInput(format!(
                            "cap index {bad} is outside the {p}-vertex profile"
                        ))
                        .into());
                    }
                    caps.to_vec()
                }
                None => fan(p)?,
            };
            let first = to_index(self.ring_count * p)?;
            let last = to_index((self.ring_count + 1) * p)?;
            indices.extend(
                mirror_triangles(&cap)
                    .iter()
                    .map(|&[a, b, c]| [a + first, b + first, c + first]),
            );
            indices.extend(cap.iter().map(|&[a, b, c]| [a + last, b + last, c + last]));
        }

        debug!(
            rings = self.ring_count,
            profile_vertices = p,
            triangles = indices.len(),
            capped,
            "stitched loft"
        );

        Ok(indices)
    }
}

/// Fan triangulation `(0, k, k + 1)` of a convex counter-clockwise loop.
fn fan(len: usize) -> Result<Vec<[u32; 3]>> {
    (1..len.saturating_sub(1))
        .map(|k| -> Result<[u32; 3]> { Ok([0, to_index(k)?, to_index(k + 1)?]) })
        .collect()
}
