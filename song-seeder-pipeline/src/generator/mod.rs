//! Synthetic song generator.
//!
//! Produces a lazy, finite sequence of [`SongAction`]s. Every field is an
//! independent random draw; there is no correlation between genre and tags.
//!
//! Pass a seed to make the output reproducible, e.g. in tests. Without one
//! the generator is seeded from OS entropy.

mod pools;
pub mod text;

pub use pools::{ARTIST_POOL, GENRE_POOL, TAG_POOL};

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;
use uuid::{Builder, Uuid};

use song_seeder_shared::{SongAction, SongDocument, DEFAULT_INDEX};

/// Shortest generated song.
pub const MIN_DURATION_MS: u32 = 120_000;

/// Longest generated song.
pub const MAX_DURATION_MS: u32 = 300_000;

/// How far back release dates reach.
pub const RELEASE_WINDOW_YEARS: u32 = 50;

const MAX_LYRICS_CHARS: usize = 200;

/// Configuration for the song generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Index every action targets.
    pub index: String,
    /// Number of actions to produce.
    pub total: usize,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Whether to fill the optional `email` field.
    pub include_email: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            total: 1_000_000,
            seed: None,
            include_email: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a config producing `total` actions for `index`.
    pub fn new(index: impl Into<String>, total: usize) -> Self {
        Self {
            index: index.into(),
            total,
            ..Default::default()
        }
    }

    /// Seed the generator for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fill the optional `email` field on every document.
    pub fn with_email(mut self) -> Self {
        self.include_email = true;
        self
    }
}

/// Iterator over synthetic song actions.
///
/// Yields exactly `total` items, then `None` forever.
#[derive(Debug)]
pub struct SongGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    today: NaiveDate,
    earliest: NaiveDate,
    remaining: usize,
}

impl SongGenerator {
    /// Create a generator whose release dates end today (UTC).
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let today = Utc::now().date_naive();

        debug!(
            index = %config.index,
            total = config.total,
            seeded = config.seed.is_some(),
            "Created song generator"
        );

        Self {
            remaining: config.total,
            earliest: window_start(today),
            today,
            rng,
            config,
        }
    }

    /// Pin the last possible release date. Used to make seeded output stable
    /// across days.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self.earliest = window_start(today);
        self
    }

    /// The release date window, inclusive on both ends.
    pub fn release_window(&self) -> (NaiveDate, NaiveDate) {
        (self.earliest, self.today)
    }

    /// Take up to `size` actions. Returns an empty vector once exhausted.
    pub fn next_batch(&mut self, size: usize) -> Vec<SongAction> {
        self.by_ref().take(size).collect()
    }

    fn random_id(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    fn release_date(&mut self) -> NaiveDate {
        let span = (self.today - self.earliest).num_days().max(0) as u64;
        let offset = self.rng.gen_range(0..=span);
        self.earliest + Days::new(offset)
    }

    fn generate(&mut self) -> SongAction {
        let song_id = self.random_id();
        let release_date = self.release_date();
        let rng = &mut self.rng;

        let tag_count = rng.gen_range(1..=3);
        let tags = TAG_POOL
            .choose_multiple(rng, tag_count)
            .map(|tag| tag.to_string())
            .collect();

        let document = SongDocument {
            song_id,
            title: text::sentence(rng, 3).trim_end_matches('.').to_string(),
            artists: vec![ARTIST_POOL[rng.gen_range(0..ARTIST_POOL.len())].to_string()],
            album: text::sentence(rng, 2).trim_end_matches('.').to_string(),
            release_date,
            year: release_date.year(),
            genre: GENRE_POOL[rng.gen_range(0..GENRE_POOL.len())].to_string(),
            composer: text::name(rng),
            lyrics: text::text(rng, MAX_LYRICS_CHARS),
            duration_ms: rng.gen_range(MIN_DURATION_MS..=MAX_DURATION_MS),
            comment: text::sentence(rng, 6),
            tags,
            email: self.config.include_email.then(|| text::email(rng)),
        };

        SongAction::new(self.config.index.clone(), document)
    }
}

fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(RELEASE_WINDOW_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}

impl Iterator for SongGenerator {
    type Item = SongAction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SongGenerator {}
