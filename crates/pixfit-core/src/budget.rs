//! Size-constrained encoding: fit an image under a byte budget.
//!
//! Two independent strategies over a one-dimensional parameter space, each
//! probing with a trial encode and inspecting the output size:
//!
//! - [`fit_quality`] binary-searches JPEG quality for the highest quality
//!   whose encoded size fits the budget. Bounded at `O(log(quality span))`
//!   probes. Assumes encoded size is monotonically non-increasing as quality
//!   decreases; that assumption is inherited from the encoder, not verified.
//! - [`shrink_to_fit`] linearly walks the long side down in fixed steps,
//!   re-encoding until the size target or a dimension floor is reached.
//!   Bounded at `ceil((long_side - min_dimension) / step)` passes. Hitting
//!   the floor is a best-effort outcome, not an error.
//!
//! All size measurement happens in memory; no disk I/O is involved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::resize::{self, ResizeError, ResizeSpec};
use crate::RgbBuffer;

/// Quality used for trial encodes in the by-resolution search and for the
/// final pipeline encode. Matches the "shrink resolution, not quality"
/// contract of that strategy.
pub const SHRINK_QUALITY: u8 = 100;

/// Tunable parameters for the budget searches.
///
/// These were implicit module-level constants in earlier designs; they are
/// explicit per-call configuration so callers and tests can tune them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetParams {
    /// Floor for the long side in the by-resolution search (default 32).
    pub min_dimension: u32,
    /// Pixels removed from the long side per shrink pass (default 32).
    pub step: u32,
    /// Lowest JPEG quality the by-quality search will accept (default 25).
    pub quality_min: u8,
    /// Highest JPEG quality the by-quality search will try (default 96).
    pub quality_max: u8,
}

impl Default for BudgetParams {
    fn default() -> Self {
        Self {
            min_dimension: 32,
            step: 32,
            quality_min: 25,
            quality_max: 96,
        }
    }
}

impl BudgetParams {
    fn validate(&self) -> Result<(), BudgetError> {
        if self.step == 0 {
            return Err(BudgetError::InvalidParams(
                "step must be non-zero".to_string(),
            ));
        }
        if self.quality_min > self.quality_max {
            return Err(BudgetError::InvalidParams(format!(
                "quality_min ({}) must not exceed quality_max ({})",
                self.quality_min, self.quality_max
            )));
        }
        Ok(())
    }
}

/// Errors from the budget searches.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// No quality in the configured range produced a small enough file.
    /// The search completed; this is distinct from a decode/encode failure.
    #[error(
        "no quality in {quality_min}..={quality_max} fits {target_bytes} bytes \
         (smallest attempt was {smallest_bytes} bytes)"
    )]
    UnsatisfiableBudget {
        quality_min: u8,
        quality_max: u8,
        target_bytes: usize,
        smallest_bytes: usize,
    },

    /// A search parameter is out of range.
    #[error("Invalid budget parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Resize(#[from] ResizeError),
}

/// Result of the by-quality search: the encoded bytes and the quality that
/// produced them.
#[derive(Debug, Clone)]
pub struct QualityFit {
    /// JPEG bytes at the best-accepted quality.
    pub bytes: Vec<u8>,
    /// The highest quality in range whose output fit the budget.
    pub quality: u8,
}

/// Result of the by-resolution search.
///
/// `within_budget` distinguishes a satisfied target from the soft-contract
/// case where the dimension floor was reached first and the smallest
/// attempted image is returned anyway.
#[derive(Debug, Clone)]
pub struct ShrinkOutcome {
    /// The (possibly shrunk) image.
    pub image: RgbBuffer,
    /// JPEG bytes of `image` at [`SHRINK_QUALITY`].
    pub bytes: Vec<u8>,
    /// Whether the encoded size met the target.
    pub within_budget: bool,
    /// Number of shrink passes performed.
    pub passes: u32,
}

impl ShrinkOutcome {
    /// Encoded size in kilobytes.
    pub fn kilobytes(&self) -> f32 {
        self.bytes.len() as f32 / 1024.0
    }
}

/// Find the highest JPEG quality in `[quality_min, quality_max]` whose
/// encoded size is at most `max_bytes`.
///
/// Binary search: probe the midpoint, and if the trial encode fits, record
/// it and search the upper half for a better quality; otherwise search the
/// lower half. Terminates when the interval is empty. The encoder is
/// deterministic, so the returned bytes are exactly the best probe's output.
///
/// # Errors
///
/// Returns [`BudgetError::UnsatisfiableBudget`] when no quality in range
/// fits, rather than silently emitting an over-budget file, and
/// [`BudgetError::InvalidParams`] for an empty quality range or a zero
/// target.
pub fn fit_quality(
    image: &RgbBuffer,
    max_bytes: usize,
    params: &BudgetParams,
) -> Result<QualityFit, BudgetError> {
    params.validate()?;
    if max_bytes == 0 {
        return Err(BudgetError::InvalidParams(
            "byte budget must be non-zero".to_string(),
        ));
    }

    let mut low = i32::from(params.quality_min);
    let mut high = i32::from(params.quality_max);
    let mut best: Option<QualityFit> = None;
    let mut smallest_bytes = usize::MAX;

    while low <= high {
        let mid = (low + high) / 2;
        let bytes = codec::encode_jpeg(image, mid as u8)?;
        smallest_bytes = smallest_bytes.min(bytes.len());

        if bytes.len() <= max_bytes {
            best = Some(QualityFit {
                bytes,
                quality: mid as u8,
            });
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    best.ok_or(BudgetError::UnsatisfiableBudget {
        quality_min: params.quality_min,
        quality_max: params.quality_max,
        target_bytes: max_bytes,
        smallest_bytes,
    })
}

/// Shrink an image until its JPEG encoding fits under `target_kilobytes`,
/// or the dimension floor is reached.
///
/// Each pass resizes aspect-preserving so the long side drops by
/// `params.step`, re-encodes at [`SHRINK_QUALITY`], and remeasures in
/// memory. If the floor is hit first, the smallest attempted image is
/// returned with `within_budget` set to `false`; that is a soft contract,
/// not a failure.
///
/// # Errors
///
/// Returns [`BudgetError::InvalidParams`] for a non-positive target and
/// propagates encode/resize failures.
pub fn shrink_to_fit(
    image: &RgbBuffer,
    target_kilobytes: f32,
    params: &BudgetParams,
) -> Result<ShrinkOutcome, BudgetError> {
    params.validate()?;
    if !target_kilobytes.is_finite() || target_kilobytes <= 0.0 {
        return Err(BudgetError::InvalidParams(format!(
            "size target must be positive, got {target_kilobytes} KB"
        )));
    }

    let mut current = image.clone();
    let mut bytes = codec::encode_jpeg(&current, SHRINK_QUALITY)?;
    let mut passes = 0u32;
    let mut candidate = current.long_side().saturating_sub(params.step);

    while candidate > params.min_dimension && kilobytes(&bytes) > target_kilobytes {
        current = resize::apply(&current, ResizeSpec::FixedLongSide(candidate))?;
        bytes = codec::encode_jpeg(&current, SHRINK_QUALITY)?;
        passes += 1;
        candidate = current.long_side().saturating_sub(params.step);
    }

    let within_budget = kilobytes(&bytes) <= target_kilobytes;
    Ok(ShrinkOutcome {
        image: current,
        bytes,
        within_budget,
        passes,
    })
}

fn kilobytes(bytes: &[u8]) -> f32 {
    bytes.len() as f32 / 1024.0
}


// ============================================================================
// Property-Based Tests
// ============================================================================
