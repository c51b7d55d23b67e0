use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use fairshuffle::model::Track;
use fairshuffle::random::{BoundedRandom, EntropySource, GeneratorOptions, SystemEntropy};
use fairshuffle::selector::ArtistFairSelector;

fn track(name: &str, artist: &str) -> Track {
    Track {
        path: PathBuf::from(format!("{name}.mp3")),
        title: String::from(name),
        artist: Some(String::from(artist)),
        album: None,
    }
}

fn seeded_selector(seed: u64) -> ArtistFairSelector {
    ArtistFairSelector::with_generator(BoundedRandom::with_entropy(
        SystemEntropy::seeded(seed),
        GeneratorOptions::default(),
    ))
}

#[test]
fn dominant_artist_does_not_dominate_fair_picks() {
    let mut tracks: Vec<Track> = (0..18).map(|n| track(&format!("big_{n}"), "Big")).collect();
    tracks.push(track("small_a", "Small A"));
    tracks.push(track("small_b", "Small B"));

    let selector = seeded_selector(21);
    selector.set_track_list(&tracks);
    selector.set_fairness_strength(100).expect("strength");

    let mut per_artist: HashMap<&str, usize> = HashMap::new();
    for _ in 0..3 {
        let index = selector.next_index().expect("index");
        let artist = tracks[index].artist.as_deref().expect("artist");
        *per_artist.entry(artist).or_default() += 1;
    }

    assert_eq!(per_artist.len(), 3);
    assert!(per_artist.values().all(|count| *count == 1));
}

#[test]
fn mixed_list_round_then_revisits_remaining_artist() {
    let tracks = vec![
        track("t0", "A"),
        track("t1", "B"),
        track("t2", "A"),
        track("t3", "C"),
    ];
    let selector = seeded_selector(22);
    selector.set_track_list(&tracks);
    selector.set_fairness_strength(100).expect("strength");

    let first_round: Vec<usize> = (0..3)
        .map(|_| selector.next_index().expect("index"))
        .collect();
    let mut artists: Vec<&str> = first_round
        .iter()
        .map(|index| tracks[*index].artist.as_deref().expect("artist"))
        .collect();
    artists.sort_unstable();
    assert_eq!(artists, vec!["A", "B", "C"]);

    let fourth = selector.next_index().expect("index");
    assert!(fourth == 0 || fourth == 2);
    assert!(!first_round.contains(&fourth));
}

#[test]
fn settings_drive_strength() {
    let settings = fairshuffle::ShuffleSettings {
        fairness_strength: 0,
        ..fairshuffle::ShuffleSettings::default()
    };
    let selector = ArtistFairSelector::from_settings(&settings).expect("selector");
    selector.set_track_list(&[track("a", "A"), track("b", "B")]);

    for _ in 0..20 {
        assert!(selector.next_index().expect("index") < 2);
    }
    assert_eq!(selector.bucket_count(), 0);

    selector.set_fairness_strength(100).expect("strength");
    assert_eq!(selector.bucket_count(), 2);
}

struct CountingEntropy {
    seed: i32,
}

impl EntropySource for CountingEntropy {
    fn next_seed(&mut self) -> i32 {
        self.seed = self.seed.wrapping_add(7919);
        self.seed
    }

    fn next_below(&mut self, limit: u32) -> u32 {
        self.seed.unsigned_abs() % limit
    }
}

#[test]
fn selection_survives_an_exhausted_time_budget() {
    let rng = BoundedRandom::with_entropy(
        CountingEntropy { seed: 1 },
        GeneratorOptions {
            fallback_timeout: Duration::ZERO,
        },
    );
    let selector = ArtistFairSelector::with_generator(rng);
    let tracks = vec![track("a", "A"), track("b", "B"), track("c", "A")];
    selector.set_track_list(&tracks);
    selector.set_fairness_strength(70).expect("strength");

    for _ in 0..30 {
        assert!(selector.next_index().expect("index") < tracks.len());
    }
}
