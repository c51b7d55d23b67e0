use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("track list is empty, nothing to select from")]
    EmptyTrackList,

    #[error("random limit {limit} exceeds the generator range of {max}", max = i32::MAX)]
    LimitTooLarge { limit: usize },

    #[error("fairness strength {strength} is outside 0..=100")]
    StrengthOutOfRange { strength: u8 },
}
