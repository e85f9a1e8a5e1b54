//! Loading song records from a JSON dataset.
//!
//! The dataset is a JSON array of objects with the fields `title`, `duration`,
//! `artist_name`, `genre` and `id`. `duration` and `id` may be given as numbers or as
//! numeric strings.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use log::{info, warn};
use serde::Deserialize;

use crate::{
    error::{DatasetError, Result},
    hash_table::HashTable,
    song::SongEntry,
};

/// A numeric field as it may appear in the input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    /// A JSON number
    Number(f64),
    /// A JSON string holding a number
    Text(String),
}

impl NumberOrText {
    /// Returns the field as a float, or `None` if the text is not numeric
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Returns the field as it appeared in the input
    fn raw(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// A song object exactly as read from the dataset
#[derive(Debug, Deserialize)]
struct RawSong {
    /// Song title
    title: String,
    /// Length in seconds, possibly fractional
    duration: NumberOrText,
    /// Artist name
    artist_name: String,
    /// Genre label
    genre: String,
    /// Numeric id
    id: NumberOrText,
}

impl RawSong {
    /// Converts the raw object at position `index` into a song record
    fn into_song(self, index: usize) -> Result<SongEntry> {
        let duration = whole_seconds(&self.duration).ok_or_else(|| DatasetError::InvalidField {
            index,
            field: "duration",
            value: self.duration.raw(),
        })?;
        let id = song_id(&self.id).ok_or_else(|| DatasetError::InvalidField {
            index,
            field: "id",
            value: self.id.raw(),
        })?;

        Ok(SongEntry::new(self.title, duration, self.artist_name, self.genre, id))
    }
}

/// Truncates a duration to whole seconds.
///
/// Negative, non-finite and out of range durations are recorded as 0. Returns `None` only
/// for text that is not a number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(field: &NumberOrText) -> Option<u32> {
    let seconds = field.as_f64()?;
    if !seconds.is_finite() || seconds < 0.0 || seconds > f64::from(u32::MAX) {
        warn!("duration {} out of range, recorded as 0", field.raw());
        return Some(0);
    }
    // in range and non-negative, so the cast only drops the fraction
    Some(seconds.trunc() as u32)
}

/// Reads an id, which must be a whole number that fits in `u32`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn song_id(field: &NumberOrText) -> Option<u32> {
    match field {
        NumberOrText::Text(text) => text.trim().parse().ok(),
        NumberOrText::Number(number) => {
            let whole = number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(number);
            whole.then_some(*number as u32)
        }
    }
}

/// Converts parsed objects into song records, failing on the first invalid one
fn into_songs(raw: Vec<RawSong>) -> Result<Vec<SongEntry>> {
    raw.into_iter().enumerate().map(|(index, song)| song.into_song(index)).collect()
}

/// Parses a JSON dataset held in memory
///
/// # Errors
///
/// Returns [`DatasetError::Json`] if the input is not an array of song objects and
/// [`DatasetError::InvalidField`] if a `duration` or `id` cannot be converted.
pub fn parse_songs(json: &str) -> Result<Vec<SongEntry>> {
    into_songs(serde_json::from_str(json)?)
}

/// Parses a JSON dataset from a reader
///
/// # Errors
///
/// Same as [`parse_songs`]; read failures surface as [`DatasetError::Json`].
pub fn read_songs<R: Read>(reader: R) -> Result<Vec<SongEntry>> {
    into_songs(serde_json::from_reader(reader)?)
}

/// Loads a JSON dataset from a file
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be opened, otherwise the same errors
/// as [`parse_songs`].
pub fn load_songs(path: impl AsRef<Path>) -> Result<Vec<SongEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;

    let songs = read_songs(BufReader::new(file))?;
    info!("loaded {} songs from {}", songs.len(), path.display());
    Ok(songs)
}

/// Builds a table of songs keyed by title, starting from at least `capacity` buckets
#[must_use]
pub fn build_title_index<I>(songs: I, capacity: usize) -> HashTable<String, SongEntry>
where
    I: IntoIterator<Item = SongEntry>,
{
    let mut table = HashTable::with_capacity(capacity);
    table.extend(songs.into_iter().map(|song| (song.title().to_owned(), song)));
    table
}
