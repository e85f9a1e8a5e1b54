#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::arithmetic_side_effects)]

use std::{error::Error, path::PathBuf};

use chainmap::{HashTable, logger::initialize_logger};
use clap::Parser;
use log::info;
use plotters::{coord::Shift, prelude::*};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Number of samples plotted per series
const SAMPLES: usize = 500;

/// Plots how bucket count, load factor and the longest chain evolve while a table fills up
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of random keys to insert
    #[arg(short, long, default_value_t = 10_000)]
    keys: usize,

    /// Seed for the key generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// PNG file to write
    #[arg(short, long, default_value = "chain_stats.png")]
    output: PathBuf,
}

/// Table state after a given number of insertions
struct Sample {
    inserted: usize,
    bucket_count: usize,
    load_factor: f64,
    longest_chain: usize,
}

fn collect_samples(keys: usize, seed: u64) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = HashTable::new();
    let step = (keys / SAMPLES).max(1);
    let mut samples = Vec::with_capacity(keys / step + 1);

    for inserted in 1..=keys {
        table.insert(rng.random::<u64>(), inserted);
        if inserted.is_multiple_of(step) || inserted == keys {
            samples.push(Sample {
                inserted,
                bucket_count: table.bucket_count(),
                load_factor: table.load_factor(),
                longest_chain: table.chain_lengths().max().unwrap_or(0),
            });
        }
    }

    samples
}

fn plot(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    caption: &str,
    y_desc: &str,
    points: &[(usize, f64)],
    color: RGBColor,
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let x_max = points.last().map_or(1, |&(x, _)| x.max(1));
    let y_max = points.iter().map(|&(_, y)| y).fold(0.0, f64::max).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (font_family, 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Entries inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    let line_style = ShapeStyle::from(&color).stroke_width(2);
    chart.draw_series(LineSeries::new(points.iter().copied(), line_style))?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();
    let args = Args::parse();

    let samples = collect_samples(args.keys, args.seed);
    let Some(last) = samples.last() else {
        println!("No keys inserted, nothing to plot");
        return Ok(());
    };
    println!(
        "{} entries: {} buckets, load factor {:.3}, longest chain {}",
        last.inserted, last.bucket_count, last.load_factor, last.longest_chain
    );

    let series = |value: fn(&Sample) -> f64| -> Vec<(usize, f64)> {
        samples.iter().map(|sample| (sample.inserted, value(sample))).collect()
    };

    let root = BitMapBackend::new(&args.output, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));

    let charts: [(&str, &str, fn(&Sample) -> f64, RGBColor); 3] = [
        ("Bucket count", "Buckets", |s| s.bucket_count as f64, RGBColor(50, 90, 220)),
        ("Load factor", "Entries / buckets", |s| s.load_factor, RGBColor(220, 50, 50)),
        ("Longest chain", "Entries", |s| s.longest_chain as f64, RGBColor(50, 180, 50)),
    ];
    for (area, (caption, y_desc, value, color)) in areas.iter().zip(charts) {
        plot(area, caption, y_desc, &series(value), color)?;
    }

    root.present()?;
    info!("wrote {}", args.output.display());

    Ok(())
}
