//! Pipeline Latch Interface.
//!
//! Provides the flush and status operations every stage register supports.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of instructions as they move between stages. They support
/// flushing and status checks.
pub trait PipelineLatch {
    /// Replaces the contents with a bubble and clears every flag.
    ///
    /// Called on the younger latches when a redirect squashes the wrong path.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if the latch holds a bubble, `false` otherwise.
    fn is_empty(&self) -> bool;
}
