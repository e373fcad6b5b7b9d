//! Domain events emitted by the hiring coordinator.

/// Notice pushed to a freelancer the moment their bid is hired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiredNotice {
    /// Title of the gig the freelancer was hired for.
    pub gig_title: String,
}

impl HiredNotice {
    /// Build a notice for the given gig title.
    pub fn new(gig_title: impl Into<String>) -> Self {
        Self {
            gig_title: gig_title.into(),
        }
    }
}
