/// Configuration for [`crate::ComponentGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupOptions {
    /// Rejects adding a group to itself or to one of its descendants with
    /// [`crate::Error::CyclicComposition`].
    ///
    /// The duplicate check alone only catches instances that are already attached, so a
    /// root group could otherwise be added below itself.
    pub reject_cycles: bool,

    /// Re-checks range contiguity and the identity map after every mutation (panics on
    /// violation). Defaults to on in debug builds.
    pub validate_invariants: bool,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            reject_cycles: true,
            validate_invariants: cfg!(debug_assertions),
        }
    }
}

impl GroupOptions {
    pub fn with_reject_cycles(mut self, reject_cycles: bool) -> Self {
        self.reject_cycles = reject_cycles;
        self
    }

    pub fn with_validate_invariants(mut self, validate_invariants: bool) -> Self {
        self.validate_invariants = validate_invariants;
        self
    }
}
