use crate::error::SelectionError;
use crate::model::{ArtistKey, MAX_FAIRNESS_STRENGTH, ShuffleSettings};
use crate::random::{BoundedRandom, GeneratorOptions, SystemEntropy};
use log::{debug, trace};
use parking_lot::Mutex;
use std::collections::HashMap;

const PERCENT: usize = 100;

#[derive(Debug)]
pub struct ArtistFairSelector {
    state: Mutex<SelectorState>,
}

#[derive(Debug)]
struct SelectorState {
    artists: Vec<Option<String>>,
    strength: u8,
    buckets: BucketTable,
    rng: BoundedRandom,
}

// order[..visited] were already drawn from in the current pass.
#[derive(Debug, Default)]
struct BucketTable {
    arena: Vec<Vec<usize>>,
    order: Vec<usize>,
    visited: usize,
}

impl ArtistFairSelector {
    pub fn new() -> Self {
        Self::with_generator(BoundedRandom::new())
    }

    pub fn with_generator(rng: BoundedRandom) -> Self {
        Self {
            state: Mutex::new(SelectorState {
                artists: Vec::new(),
                strength: 0,
                buckets: BucketTable::default(),
                rng,
            }),
        }
    }

    pub fn from_settings(settings: &ShuffleSettings) -> Result<Self, SelectionError> {
        let options = GeneratorOptions {
            fallback_timeout: settings.fallback_timeout(),
        };
        let selector =
            Self::with_generator(BoundedRandom::with_entropy(SystemEntropy::new(), options));
        selector.set_fairness_strength(settings.fairness_strength)?;
        Ok(selector)
    }

    pub fn set_track_list<T: ArtistKey>(&self, tracks: &[T]) {
        let artists: Vec<Option<String>> = tracks
            .iter()
            .map(|track| track.artist_key().map(str::to_owned))
            .collect();

        let mut state = self.state.lock();
        state.artists = artists;
        state.buckets.clear();
        trace!("track list replaced with {} entries", state.artists.len());
    }

    pub fn set_fairness_strength(&self, strength: u8) -> Result<(), SelectionError> {
        if strength > MAX_FAIRNESS_STRENGTH {
            return Err(SelectionError::StrengthOutOfRange { strength });
        }

        let mut state = self.state.lock();
        let previous = state.strength;
        if previous == 0 && strength != 0 {
            state.rebuild_buckets()?;
        } else if previous != 0 && strength == 0 {
            state.buckets.clear();
            debug!("fairness disabled, bucket table discarded");
        }
        state.strength = strength;
        Ok(())
    }

    pub fn next_index(&self) -> Result<usize, SelectionError> {
        self.state.lock().next_index()
    }

    pub fn fairness_strength(&self) -> u8 {
        self.state.lock().strength
    }

    pub fn track_count(&self) -> usize {
        self.state.lock().artists.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.state.lock().buckets.len()
    }

    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.state.lock().buckets.live().map(<[usize]>::len).collect()
    }

    pub fn remaining_in_round(&self) -> usize {
        self.state.lock().buckets.live().map(<[usize]>::len).sum()
    }

    pub fn snapshot_buckets(&self) -> Vec<Vec<usize>> {
        self.state
            .lock()
            .buckets
            .live()
            .map(<[usize]>::to_vec)
            .collect()
    }
}

impl Default for ArtistFairSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorState {
    fn next_index(&mut self) -> Result<usize, SelectionError> {
        if self.artists.is_empty() {
            return Err(SelectionError::EmptyTrackList);
        }

        let roll = self.rng.next_bounded(PERCENT)?;
        if roll < usize::from(self.strength) {
            trace!("fair draw (roll {roll} < {})", self.strength);
            self.next_fair_index()
        } else {
            trace!("uniform draw (roll {roll} >= {})", self.strength);
            self.rng.next_bounded(self.artists.len())
        }
    }

    fn next_fair_index(&mut self) -> Result<usize, SelectionError> {
        if self.buckets.is_empty() {
            self.rebuild_buckets()?;
        }

        let index = self.buckets.take(&mut self.rng)?;
        trace!(
            "picked track {index}, {} artists left in round",
            self.buckets.len()
        );
        Ok(index)
    }

    fn rebuild_buckets(&mut self) -> Result<(), SelectionError> {
        self.buckets.rebuild(&self.artists, &mut self.rng)?;
        debug!(
            "rebuilt buckets for {} artists over {} tracks",
            self.buckets.len(),
            self.artists.len()
        );
        Ok(())
    }
}

impl BucketTable {
    fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
        self.visited = 0;
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn live(&self) -> impl Iterator<Item = &[usize]> {
        self.order.iter().map(|slot| self.arena[*slot].as_slice())
    }

    fn rebuild(
        &mut self,
        artists: &[Option<String>],
        rng: &mut BoundedRandom,
    ) -> Result<(), SelectionError> {
        self.clear();

        let mut slots: HashMap<Option<&str>, usize> = HashMap::new();
        for (index, artist) in artists.iter().enumerate() {
            let slot = *slots.entry(artist.as_deref()).or_insert_with(|| {
                self.arena.push(Vec::new());
                self.arena.len() - 1
            });
            self.arena[slot].push(index);
        }

        self.order = (0..self.arena.len()).collect();
        rng.shuffle(&mut self.order)
    }

    fn take(&mut self, rng: &mut BoundedRandom) -> Result<usize, SelectionError> {
        if self.order.is_empty() {
            return Err(SelectionError::EmptyTrackList);
        }
        if self.visited >= self.order.len() {
            self.visited = 0;
        }

        let position = self.visited + rng.next_bounded(self.order.len() - self.visited)?;
        let bucket = &mut self.arena[self.order[position]];
        let pick = rng.next_bounded(bucket.len())?;
        let index = bucket.swap_remove(pick);

        if bucket.is_empty() {
            self.order.swap_remove(position);
        } else {
            self.order.swap(position, self.visited);
            self.visited += 1;
        }
        Ok(index)
    }
}
