//! Target shapes expressed as ordered point clouds.
//!
//! A humanoid silhouette is a head ring, two vertical body strands (the left
//! one longer and coarser below a split index) and two short arm strands.
//! Shapes are pure functions of their parameters; a [`TargetSet`] is never
//! edited in place, a new one is built whenever the parameters change.

use crate::error::ChoreoError;
use glam::Vec3;
use std::f32::consts::TAU;

/// Geometry of one humanoid silhouette, in engine units (y grows downward).
///
/// Counts define topology; every other field is a length and is scaled by
/// [`SilhouetteParams::scaled`].
#[derive(Clone, Debug, PartialEq)]
pub struct SilhouetteParams {
    pub head_points: usize,
    pub head_radius: f32,
    /// Points in the left strand.
    pub strand_points: usize,
    /// Index where the left strand switches to the lower stride. The right
    /// strand stops here.
    pub strand_split: usize,
    pub strand_offset_x: f32,
    pub upper_stride: f32,
    pub lower_stride: f32,
    /// Horizontal shift applied to the left strand below the split.
    pub lower_shift_x: f32,
    /// Vertical offset of the top of every strand from the figure origin.
    pub top_offset_y: f32,
    pub arm_points: usize,
    pub arm_offset_x: f32,
    pub arm_stride: f32,
}

impl Default for SilhouetteParams {
    fn default() -> Self {
        Self {
            head_points: 36,
            head_radius: 50.0,
            strand_points: 75,
            strand_split: 50,
            strand_offset_x: 50.0,
            upper_stride: 3.0,
            lower_stride: 4.0,
            lower_shift_x: -25.0,
            top_offset_y: -150.0,
            arm_points: 25,
            arm_offset_x: 75.0,
            arm_stride: 2.0,
        }
    }
}

impl SilhouetteParams {
    /// Scale all lengths by `factor`, keeping point counts.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            head_radius: self.head_radius * factor,
            strand_offset_x: self.strand_offset_x * factor,
            upper_stride: self.upper_stride * factor,
            lower_stride: self.lower_stride * factor,
            lower_shift_x: self.lower_shift_x * factor,
            top_offset_y: self.top_offset_y * factor,
            arm_offset_x: self.arm_offset_x * factor,
            arm_stride: self.arm_stride * factor,
            ..self.clone()
        }
    }

    /// Number of points one silhouette built from these params contains.
    pub fn point_count(&self) -> usize {
        self.head_points + self.strand_points + self.strand_split + 2 * self.arm_points
    }

    /// Reject parameters that would yield degenerate geometry.
    pub fn validate(&self) -> Result<(), ChoreoError> {
        for (field, count) in [
            ("head_points", self.head_points),
            ("strand_points", self.strand_points),
            ("arm_points", self.arm_points),
        ] {
            if count == 0 {
                return Err(ChoreoError::invalid_shape(field, "count must be positive"));
            }
        }
        if self.strand_split == 0 || self.strand_split > self.strand_points {
            return Err(ChoreoError::invalid_shape(
                "strand_split",
                format!("must lie in 1..={}", self.strand_points),
            ));
        }
        for (field, len) in [
            ("head_radius", self.head_radius),
            ("upper_stride", self.upper_stride),
            ("lower_stride", self.lower_stride),
            ("arm_stride", self.arm_stride),
        ] {
            if !(len.is_finite() && len > 0.0) {
                return Err(ChoreoError::invalid_shape(
                    field,
                    format!("must be finite and positive, got {len}"),
                ));
            }
        }
        for (field, off) in [
            ("strand_offset_x", self.strand_offset_x),
            ("lower_shift_x", self.lower_shift_x),
            ("top_offset_y", self.top_offset_y),
            ("arm_offset_x", self.arm_offset_x),
        ] {
            if !off.is_finite() {
                return Err(ChoreoError::invalid_shape(field, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Build one silhouette centred on `(offset_x, offset_y)` in the z = 0 plane.
///
/// Point order: head ring, then the body strands interleaved (left point,
/// then right point while above the split), then the arms as left/right pairs.
pub fn build_silhouette(
    params: &SilhouetteParams,
    offset_x: f32,
    offset_y: f32,
) -> Result<Vec<Vec3>, ChoreoError> {
    params.validate()?;
    if !(offset_x.is_finite() && offset_y.is_finite()) {
        return Err(ChoreoError::invalid_shape("offset", "must be finite"));
    }
    let mut points = Vec::with_capacity(params.point_count());

    let step = TAU / params.head_points as f32;
    for i in 0..params.head_points {
        let angle = step * i as f32;
        points.push(Vec3::new(
            offset_x + params.head_radius * angle.cos(),
            offset_y + params.head_radius * angle.sin(),
            0.0,
        ));
    }

    let top = offset_y + params.top_offset_y;
    for i in 0..params.strand_points {
        let upper = i < params.strand_split;
        let (stride, shift) = if upper {
            (params.upper_stride, 0.0)
        } else {
            (params.lower_stride, params.lower_shift_x)
        };
        points.push(Vec3::new(
            offset_x - params.strand_offset_x + shift,
            top + i as f32 * stride,
            0.0,
        ));
        if upper {
            points.push(Vec3::new(
                offset_x + params.strand_offset_x,
                top + i as f32 * params.upper_stride,
                0.0,
            ));
        }
    }

    for i in 0..params.arm_points {
        let y = top + i as f32 * params.arm_stride;
        points.push(Vec3::new(offset_x - params.arm_offset_x, y, 0.0));
        points.push(Vec3::new(offset_x + params.arm_offset_x, y, 0.0));
    }

    Ok(points)
}

/// Immutable collection of points particles steer toward.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetSet {
    points: Vec<Vec3>,
}

impl TargetSet {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Empty set; shape-seeking is disabled while it is active.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenate one silhouette per figure origin.
    pub fn tableau(params: &SilhouetteParams, origins: &[[f32; 2]]) -> Result<Self, ChoreoError> {
        let mut points = Vec::with_capacity(params.point_count() * origins.len());
        for [x, y] in origins {
            points.extend(build_silhouette(params, *x, *y)?);
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
