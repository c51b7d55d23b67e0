use fairshuffle::{
    ArtistFairSelector, BoundedRandom, GeneratorOptions, ShuffleSettings, SystemEntropy, Track,
    config, library, stats,
};
use std::path::PathBuf;

const DEFAULT_PICKS: usize = 20;
const DEFAULT_DISTRIBUTION_RUNS: u64 = 100_000;

#[derive(Debug, Default)]
struct CliArgs {
    track_files: Vec<PathBuf>,
    strength: Option<u8>,
    count: Option<usize>,
    seed: Option<u64>,
    save: bool,
    report: bool,
    distribution_limit: Option<usize>,
    runs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1).collect())?;

    let mut settings = config::load_settings()?;
    if let Some(strength) = args.strength {
        settings.fairness_strength = strength;
    }
    if args.save {
        config::save_settings(&settings)?;
        log::info!("saved fairness strength {}", settings.fairness_strength);
    }

    let rng = generator(&settings, args.seed);

    if let Some(limit) = args.distribution_limit {
        let mut rng = rng;
        let runs = args.runs.unwrap_or(DEFAULT_DISTRIBUTION_RUNS);
        let report = stats::sample_generator(&mut rng, limit, runs)?;
        for line in report.lines() {
            println!("{line}");
        }
        if rng.fallback_count() > 0 {
            log::warn!("{} draws used the entropy fallback", rng.fallback_count());
        }
        return Ok(());
    }

    let tracks = collect_tracks(&args)?;
    if tracks.is_empty() {
        anyhow::bail!("no tracks found, pass --tracks <file.json>");
    }

    let selector = ArtistFairSelector::with_generator(rng);
    selector.set_track_list(&tracks);
    selector.set_fairness_strength(settings.fairness_strength)?;

    if args.report {
        let runs = args.runs.unwrap_or(DEFAULT_DISTRIBUTION_RUNS);
        let report = stats::sample_selector(&selector, runs)?;
        for line in report.lines() {
            println!("{line}");
        }
        return Ok(());
    }

    for pick in 1..=args.count.unwrap_or(DEFAULT_PICKS) {
        let track = &tracks[selector.next_index()?];
        println!(
            "{pick:>4}. {} - {}",
            track.artist.as_deref().unwrap_or("Unknown artist"),
            track.title
        );
    }
    Ok(())
}

fn generator(settings: &ShuffleSettings, seed: Option<u64>) -> BoundedRandom {
    let options = GeneratorOptions {
        fallback_timeout: settings.fallback_timeout(),
    };
    match seed {
        Some(seed) => BoundedRandom::with_entropy(SystemEntropy::seeded(seed), options),
        None => BoundedRandom::with_entropy(SystemEntropy::new(), options),
    }
}

fn collect_tracks(args: &CliArgs) -> anyhow::Result<Vec<Track>> {
    let mut tracks = Vec::new();
    for file in &args.track_files {
        tracks.extend(library::load_track_list(file)?);
    }
    Ok(tracks)
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        let flag = args[index].as_str();
        match flag {
            "--tracks" => out.track_files.push(PathBuf::from(value(&args, &mut index, flag)?)),
            "--strength" => {
                let strength: u8 = value(&args, &mut index, flag)?.parse()?;
                if strength > 100 {
                    anyhow::bail!("--strength must be within 0..=100");
                }
                out.strength = Some(strength);
            }
            "--count" => out.count = Some(value(&args, &mut index, flag)?.parse()?),
            "--seed" => out.seed = Some(value(&args, &mut index, flag)?.parse()?),
            "--runs" => out.runs = Some(value(&args, &mut index, flag)?.parse()?),
            "--check-distribution" => {
                out.distribution_limit = Some(value(&args, &mut index, flag)?.parse()?)
            }
            "--save" => out.save = true,
            "--report" => out.report = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *index += 1;
    let Some(value) = args.get(*index) else {
        anyhow::bail!("{flag} requires a value");
    };
    if value.trim().is_empty() {
        anyhow::bail!("{flag} cannot be empty");
    }
    Ok(value.trim())
}

fn print_help() {
    println!("fairshuffle");
    println!("  --tracks file.json          Load a JSON track list (repeatable)");
    println!("  --strength 0..100           Fairness strength override");
    println!("  --count N                   Number of picks to print");
    println!("  --seed N                    Seed the entropy source for reproducible output");
    println!("  --save                      Persist the effective fairness strength");
    println!("  --check-distribution LIMIT  Print a distribution report for [0, LIMIT)");
    println!("  --report                    Print how often each track is picked");
    println!("  --runs N                    Draws used by --check-distribution and --report");
}
