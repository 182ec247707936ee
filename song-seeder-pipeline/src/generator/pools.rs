//! Fixed value pools the generator draws from.

/// Artists a song can be attributed to.
pub const ARTIST_POOL: &[&str] = &[
    "the_beatles",
    "queen",
    "michael_jackson",
    "taylor_swift",
    "coldplay",
];

/// Tags sampled (without repetition) onto each song.
pub const TAG_POOL: &[&str] = &["rock", "pop", "classic", "dance", "ballad", "jazz", "hiphop"];

/// Genres a song can belong to.
pub const GENRE_POOL: &[&str] = &["rock", "pop", "classic", "dance", "jazz", "hiphop", "blues"];

/// Vocabulary for synthesized titles, albums, lyrics and comments.
pub(crate) const WORDS: &[&str] = &[
    "love", "night", "dream", "fire", "heart", "river", "light", "shadow", "summer", "rain",
    "road", "home", "city", "star", "ocean", "memory", "golden", "broken", "wild", "silent",
    "dance", "echo", "morning", "storm", "velvet", "midnight", "paper", "glass", "forever",
    "blue", "electric", "garden", "window", "highway", "honey", "thunder", "winter", "mirror",
    "stone", "wave", "sky", "moon", "smoke", "crystal", "neon", "fever", "radio", "ghost",
    "sweet", "lonely", "run", "fall", "rise", "burn", "hold", "remember", "carry", "follow",
    "whisper", "shine", "wander", "believe", "open", "close", "little", "always", "never",
    "again", "tonight", "together", "away", "back", "down", "over", "under", "through",
];

pub(crate) const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Margaret", "Mark",
    "Sandra", "Paul", "Ashley", "Steven", "Emily", "Andrew", "Donna", "Joshua", "Michelle",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "mail.test",
    "inbox.test",
];
