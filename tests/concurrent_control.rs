use std::sync::Arc;
use std::thread;

use fairshuffle::random::{BoundedRandom, GeneratorOptions, SystemEntropy};
use fairshuffle::selector::ArtistFairSelector;

const LONGEST_LIST: usize = 12;

fn list(len: usize) -> Vec<String> {
    (0..len).map(|n| format!("artist-{}", n % 3)).collect()
}

#[test]
fn playback_and_control_threads_share_one_selector() {
    let selector = Arc::new(ArtistFairSelector::with_generator(
        BoundedRandom::with_entropy(SystemEntropy::seeded(99), GeneratorOptions::default()),
    ));
    selector.set_track_list(&list(LONGEST_LIST));
    selector.set_fairness_strength(80).expect("strength");

    let control = {
        let selector = Arc::clone(&selector);
        thread::spawn(move || {
            for step in 0..500usize {
                match step % 3 {
                    0 => selector.set_track_list(&list(1 + step % LONGEST_LIST)),
                    1 => selector
                        .set_fairness_strength((step % 101) as u8)
                        .expect("strength"),
                    _ => selector.set_fairness_strength(0).expect("strength"),
                }
            }
        })
    };

    let playback = {
        let selector = Arc::clone(&selector);
        thread::spawn(move || {
            for _ in 0..2_000 {
                let index = selector.next_index().expect("index");
                assert!(index < LONGEST_LIST);
            }
        })
    };

    control.join().expect("control thread");
    playback.join().expect("playback thread");

    let remaining = selector.remaining_in_round();
    assert!(remaining <= selector.track_count());
}
