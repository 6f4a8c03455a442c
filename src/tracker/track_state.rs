/// Lifecycle state of a track identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackState {
    /// Matched in the most recent frame
    #[default]
    Active,
    /// Unmatched, waiting to be re-identified
    Disappeared,
}
