#![allow(clippy::missing_docs_in_private_items)]

use std::{
    error::Error,
    io::{self, BufRead},
    path::PathBuf,
};

use chainmap::{
    HashTable, MIN_CAPACITY, SongEntry,
    dataset::{build_title_index, load_songs},
    logger::initialize_logger,
};
use clap::Parser;
use log::debug;

/// Looks up song titles in a table of songs keyed by title
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON dataset of songs
    #[arg(short, long)]
    input: PathBuf,

    /// Number of buckets to request up front
    #[arg(short, long, default_value_t = MIN_CAPACITY)]
    capacity: usize,

    /// Titles to look up; read one per line from stdin when none are given
    titles: Vec<String>,
}

fn report(table: &HashTable<String, SongEntry>, title: &str) {
    let message = if table.contains_key(title) { "found" } else { "not found" };
    println!("Requested title \"{title}\" is {message}.");
}

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();
    let args = Args::parse();

    let songs = load_songs(&args.input)?;
    println!("Total number of songs read {}", songs.len());

    let table = build_title_index(songs, args.capacity);
    println!("The number of elements in table {}", table.len());
    debug!("title index uses {} buckets", table.bucket_count());

    if !args.titles.is_empty() {
        for title in &args.titles {
            report(&table, title);
        }
        return Ok(());
    }

    println!("Enter a title to search for. For example \"Blues Power\" or \"does not exist\":");
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        report(&table, &line);
    }

    Ok(())
}
