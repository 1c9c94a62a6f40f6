//! Rolling statistics over a window of RPS samples

use loadwatch_types::WindowStats;

/// Compute window statistics and score `latest` against them
///
/// Population standard deviation (divide by `n`). The z-score is only defined
/// for more than one sample with a non-zero spread; otherwise it is 0, never
/// NaN or infinite.
pub fn compute(samples: &[f64], latest: f64, threshold: f64) -> WindowStats {
    let count = samples.len();
    if count == 0 {
        return WindowStats::default();
    }

    let (mean, std_dev, z_score) = if is_constant(samples) {
        // exact, so every deviation is exactly zero
        (samples[0], 0.0, 0.0)
    } else {
        let (mean, std_dev) = spread(samples);
        if mean.is_finite() && std_dev.is_finite() {
            (mean, std_dev, score(latest, mean, std_dev, count))
        } else {
            scaled(samples, latest, count)
        }
    };

    WindowStats {
        count,
        mean,
        std_dev,
        z_score,
        is_anomaly: z_score.abs() > threshold,
    }
}

/// Mean and population standard deviation
fn spread(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Same statistics on values divided by the largest magnitude, for windows
/// whose sums or squared deviations overflow
fn scaled(samples: &[f64], latest: f64, count: usize) -> (f64, f64, f64) {
    let scale = samples.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    let unit: Vec<f64> = samples.iter().map(|x| x / scale).collect();
    let (mean, std_dev) = spread(&unit);
    let z_score = score(latest / scale, mean, std_dev, count);
    (mean * scale, std_dev * scale, z_score)
}

fn score(latest: f64, mean: f64, std_dev: f64, count: usize) -> f64 {
    if count < 2 || std_dev <= 0.0 {
        return 0.0;
    }
    let z = (latest - mean) / std_dev;
    if z.is_finite() {
        z
    } else {
        0.0
    }
}

fn is_constant(samples: &[f64]) -> bool {
    samples.windows(2).all(|pair| pair[0] == pair[1])
}
