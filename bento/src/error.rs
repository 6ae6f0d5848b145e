/// Contract violations reported by [`crate::ComponentGroup`] and [`crate::AccordionList`].
///
/// Every variant is returned before any state is touched: a failed call leaves the
/// group exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The component instance is already attached to a group (this one or another).
    #[error("component is already attached to a group")]
    DuplicateComponent,

    /// Attaching the component would make a group its own descendant.
    #[error("component is the group itself or one of its ancestors")]
    CyclicComposition,

    /// A slot index outside the valid range for the operation.
    #[error("index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A flat position outside `[0, span)`.
    #[error("position {position} out of range (span: {span})")]
    PositionOutOfRange { position: usize, span: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
