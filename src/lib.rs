pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod random;
pub mod selector;
pub mod stats;

pub use error::SelectionError;
pub use model::{ArtistKey, ShuffleSettings, Track};
pub use random::{BoundedRandom, EntropySource, GeneratorOptions, SystemEntropy};
pub use selector::ArtistFairSelector;
