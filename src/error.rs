//! Reasons a pointer sample produced no movement.

/// Non-fatal failures while turning a pointer sample into a delta.
///
/// None of these reach the user; the engine skips the sample and retries on
/// the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// The view matrix is not invertible.
    #[error("camera produced no ray for the pointer position")]
    NoRay,
    /// Zero denominator in the ray/plane test.
    #[error("pointer ray is parallel to the movement plane")]
    ParallelPlane,
    /// The intersection is behind the camera.
    #[error("movement plane lies behind the ray origin")]
    BehindRay,
    /// The pivot is behind the camera or outside the view.
    #[error("pivot does not project onto the screen")]
    OffScreen,
    /// The start distance to the pivot is zero, so no ratio exists.
    #[error("pointer started on top of the projected pivot")]
    DegenerateDistance,
}
