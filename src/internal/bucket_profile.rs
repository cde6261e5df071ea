//! Measures how the sorted-chain table distributes random keys as it grows, and plots it.
#![allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]

use plotters::prelude::*;
use rand::Rng;
use sorted_chain::SortedChainHashTable;

/// Largest number of keys inserted in one run
const MAX_KEYS: usize = 200_000;
/// Number of table sizes sampled between `MAX_KEYS / STEPS` and `MAX_KEYS`
const STEPS: usize = 20;
/// Keys are drawn uniformly from `0..KEY_RANGE`
const KEY_RANGE: i64 = 1_000_000_000;

/// Extracts one plotted quantity from a sample
type Metric = fn(&Sample) -> f64;

/// Shape of one table after a batch of inserts
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Number of distinct keys stored
    keys: usize,
    /// Bucket count after the inserts
    capacity: usize,
    /// Stored keys per bucket
    load_factor: f64,
    /// Length of the fullest bucket
    longest_bucket: usize,
    /// Mean length over the buckets holding at least one entry
    mean_chain: f64,
}

/// Fills a fresh table with `n` random keys and records its shape
fn profile(n: usize, rng: &mut impl Rng) -> Sample {
    let mut table = SortedChainHashTable::new();
    while table.len() < n {
        let key = rng.random_range(0..KEY_RANGE);
        table.insert(key, ());
    }

    let lengths: Vec<usize> = table.buckets().map(<[_]>::len).collect();
    let occupied = lengths.iter().filter(|&&len| len > 0).count().max(1);

    Sample {
        keys: table.len(),
        capacity: table.capacity(),
        load_factor: table.load_factor(),
        longest_bucket: lengths.iter().copied().max().unwrap_or(0),
        mean_chain: table.len() as f64 / occupied as f64,
    }
}

/// Draws one line per series against the number of stored keys
fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    samples: &[Sample],
    series: &[(&str, RGBColor, Metric)],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = samples
        .iter()
        .flat_map(|sample| series.iter().map(move |(_, _, value)| value(sample)))
        .fold(0.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..MAX_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for &(label, color, value) in series {
        let style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.keys, value(sample))),
                style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((font_family, 16))
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();

    let samples: Vec<Sample> = (1..=STEPS)
        .map(|step| {
            let sample = profile(MAX_KEYS * step / STEPS, &mut rng);
            println!(
                "{:>7} keys: capacity = {:>7}, load factor = {:.3}, longest bucket = {}, mean chain = {:.3}",
                sample.keys,
                sample.capacity,
                sample.load_factor,
                sample.longest_bucket,
                sample.mean_chain
            );
            sample
        })
        .collect();

    let bucket_series: [(&str, RGBColor, Metric); 2] = [
        ("Longest bucket", RGBColor(220, 50, 50), |s| s.longest_bucket as f64),
        ("Mean non-empty bucket", RGBColor(50, 90, 220), |s| s.mean_chain),
    ];
    plot(
        "bucket_lengths.png",
        "Bucket Lengths of the Sorted Chain Table",
        "Entries per bucket",
        &samples,
        &bucket_series,
    )?;

    let load_series: [(&str, RGBColor, Metric); 1] =
        [("Load factor", RGBColor(50, 180, 50), |s| s.load_factor)];
    plot("load_factor.png", "Load Factor After Growth", "Keys per bucket", &samples, &load_series)?;

    println!("Plots written to bucket_lengths.png and load_factor.png");
    Ok(())
}
