use crate::error::SelectionError;
use crate::random::BoundedRandom;
use crate::selector::ArtistFairSelector;

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    pub counts: Vec<u64>,
    pub runs: u64,
    pub mean: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub relative_standard_deviation: f64,
    pub chi_square: f64,
}

impl DistributionReport {
    pub fn from_counts(counts: Vec<u64>) -> Self {
        let runs: u64 = counts.iter().sum();
        let buckets = counts.len().max(1) as f64;
        let mean = runs as f64 / buckets;

        let variance = counts
            .iter()
            .map(|count| (*count as f64 - mean).powi(2))
            .sum::<f64>()
            / buckets;
        let standard_deviation = variance.sqrt();
        let relative_standard_deviation = if mean > 0.0 {
            standard_deviation / mean
        } else {
            0.0
        };
        let chi_square = if mean > 0.0 {
            counts
                .iter()
                .map(|count| (*count as f64 - mean).powi(2) / mean)
                .sum()
        } else {
            0.0
        };

        Self {
            counts,
            runs,
            mean,
            variance,
            standard_deviation,
            relative_standard_deviation,
            chi_square,
        }
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.counts.len().saturating_sub(1)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, count)| format!("{value:>6}: {count}"))
            .collect();
        lines.push(format!("mean: {:.2}", self.mean));
        lines.push(format!("variance: {:.2}", self.variance));
        lines.push(format!("standard deviation: {:.2}", self.standard_deviation));
        lines.push(format!(
            "relative standard deviation: {:.4} %",
            self.relative_standard_deviation * 100.0
        ));
        lines.push(format!(
            "chi-square: {:.2} ({} degrees of freedom)",
            self.chi_square,
            self.degrees_of_freedom()
        ));
        lines
    }
}

pub fn sample_generator(
    rng: &mut BoundedRandom,
    limit: usize,
    runs: u64,
) -> Result<DistributionReport, SelectionError> {
    let mut counts = vec![0u64; limit.max(1)];
    for _ in 0..runs {
        counts[rng.next_bounded(limit)?] += 1;
    }
    Ok(DistributionReport::from_counts(counts))
}

pub fn sample_selector(
    selector: &ArtistFairSelector,
    runs: u64,
) -> Result<DistributionReport, SelectionError> {
    let mut counts = vec![0u64; selector.track_count()];
    for _ in 0..runs {
        counts[selector.next_index()?] += 1;
    }
    Ok(DistributionReport::from_counts(counts))
}
