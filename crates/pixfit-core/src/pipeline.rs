//! Resize request pipeline.
//!
//! Mirrors the network-facing contract without any transport wiring: a
//! request carries up to three optional resize parameters, applied in a
//! fixed order with each step compounding on the previous result, and the
//! final image is re-encoded as JPEG.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::budget::{self, BudgetError, BudgetParams, SHRINK_QUALITY};
use crate::codec::{self, CodecError};
use crate::resize::{self, ResizeError, ResizeSpec};

/// Errors from running a resize plan.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Resize(#[from] ResizeError),

    #[error(transparent)]
    Budget(#[from] BudgetError),
}

/// A resize request: any combination of the three parameters.
///
/// Steps are applied in declaration order - percentage first, then the
/// byte-size budget, then explicit dimensions - each operating on the output
/// of the one before. An empty plan is a plain decode and JPEG re-encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResizePlan {
    /// Scale both sides to this percentage of the current size.
    pub percentage: Option<f32>,
    /// Shrink until the JPEG encoding fits under this many kilobytes.
    pub max_kilobytes: Option<f32>,
    /// Resize to these exact dimensions, ignoring aspect ratio.
    pub dimensions: Option<(u32, u32)>,
}

impl ResizePlan {
    /// Whether the plan requests any work beyond re-encoding.
    pub fn is_empty(&self) -> bool {
        self.percentage.is_none() && self.max_kilobytes.is_none() && self.dimensions.is_none()
    }
}

/// Decode `bytes`, apply the plan's steps in fixed order, and return the
/// result as JPEG.
///
/// # Errors
///
/// Decode failures, invalid targets, and invalid budget parameters are
/// returned as the corresponding typed error; nothing is retried.
pub fn run_plan(
    bytes: &[u8],
    plan: &ResizePlan,
    params: &BudgetParams,
) -> Result<Vec<u8>, PipelineError> {
    let mut image = codec::decode(bytes)?;

    if let Some(pct) = plan.percentage {
        image = resize::apply(&image, ResizeSpec::Percentage(pct))?;
    }
    if let Some(kb) = plan.max_kilobytes {
        image = budget::shrink_to_fit(&image, kb, params)?.image;
    }
    if let Some((w, h)) = plan.dimensions {
        image = resize::apply(&image, ResizeSpec::ExactDimensions(w, h))?;
    }

    Ok(codec::encode_jpeg(&image, SHRINK_QUALITY)?)
}
