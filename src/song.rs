//! Song records from the genre subset of the Million Song Dataset.

use std::{cmp::Ordering, fmt};

/// Field a comparison between two songs is decided by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Title, ignoring case
    #[default]
    Title,
    /// Duration in seconds
    Duration,
    /// Artist name, ignoring case
    Artist,
    /// Genre, ignoring case
    Genre,
    /// Numeric id
    Id,
}

/// A single song.
///
/// Equality is structural over every field. Ordering is not intrinsic: pick a [`SortKey`]
/// and use [`SongEntry::compare`] or [`sort_songs`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongEntry {
    /// Song title
    title: String,
    /// Length in whole seconds
    duration: u32,
    /// Artist name, possibly several space separated words
    artist_name: String,
    /// Genre label
    genre: String,
    /// Numeric id
    id: u32,
}

impl SongEntry {
    /// Creates a song record
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        duration: u32,
        artist_name: impl Into<String>,
        genre: impl Into<String>,
        id: u32,
    ) -> Self {
        Self {
            title: title.into(),
            duration,
            artist_name: artist_name.into(),
            genre: genre.into(),
            id,
        }
    }

    /// Returns the title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the duration in seconds
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Returns the artist name
    #[must_use]
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Returns the genre
    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Returns the id
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Replaces the duration
    pub const fn set_duration(&mut self, duration: u32) {
        self.duration = duration;
    }

    /// Compares two songs by the field named by `key`
    #[must_use]
    pub fn compare(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Title => compare_ignore_case(&self.title, &other.title),
            SortKey::Duration => self.duration.cmp(&other.duration),
            SortKey::Artist => compare_ignore_case(&self.artist_name, &other.artist_name),
            SortKey::Genre => compare_ignore_case(&self.genre, &other.genre),
            SortKey::Id => self.id.cmp(&other.id),
        }
    }
}

impl fmt::Display for SongEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.title,
            format_duration(self.duration),
            self.artist_name,
            self.genre,
            self.id
        )
    }
}

/// Compares two strings character by character after lowercasing
fn compare_ignore_case(left: &str, right: &str) -> Ordering {
    left.chars().flat_map(char::to_lowercase).cmp(right.chars().flat_map(char::to_lowercase))
}

/// Sorts songs in place by the field named by `key`, keeping the order of equal songs
pub fn sort_songs(songs: &mut [SongEntry], key: SortKey) {
    songs.sort_by(|left, right| left.compare(right, key));
}

/// Renders a duration in seconds as `m:ss`
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
