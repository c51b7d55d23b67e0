#![no_main]

use fairshuffle::random::{BoundedRandom, GeneratorOptions, SystemEntropy};
use fairshuffle::selector::ArtistFairSelector;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let selector = ArtistFairSelector::with_generator(BoundedRandom::with_entropy(
        SystemEntropy::seeded(data.len() as u64),
        GeneratorOptions::default(),
    ));
    let mut len = 0usize;

    for byte in data {
        match byte % 4 {
            0 => {
                len = usize::from(byte / 4) % 32;
                let artists: Vec<String> = (0..len)
                    .map(|idx| format!("artist_{}", idx % (usize::from(*byte % 7) + 1)))
                    .collect();
                selector.set_track_list(&artists);
            }
            1 => {
                let _ = selector.set_fairness_strength(byte / 2);
            }
            _ => match selector.next_index() {
                Ok(index) => assert!(index < len),
                Err(_) => assert_eq!(len, 0),
            },
        }
        assert!(selector.remaining_in_round() <= len);
    }
});
