//! Inference collaborator trait and its result types

/// Bounding box of a detected object, in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Result of running inference on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// Whether the model found a match at all
    pub matched: bool,
    /// Confidence score in [0, 1]
    pub confidence: f32,
    /// Location of the match, when the model provides one
    pub bounding_box: Option<BoundingBox>,
}

impl Detection {
    /// A no-match result, also used by detectors on internal failure
    pub const fn none() -> Self {
        Self {
            matched: false,
            confidence: 0.0,
            bounding_box: None,
        }
    }
}

/// Trait for the inference collaborator
///
/// Inference cannot fail the pipeline: implementations report any internal
/// problem as an empty or low-confidence [`Detection`].
pub trait ObjectDetector {
    /// Run the model over an encoded (JPEG) frame
    fn infer(&mut self, jpeg: &[u8]) -> Detection;
}
