//! Fake text synthesis: sentences, paragraphs, names and email addresses.

use rand::Rng;

use super::pools::{EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, WORDS};

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Randomize a word count to 60-140% of `nb`, never below 1.
fn vary(rng: &mut (impl Rng + ?Sized), nb: usize) -> usize {
    let percent = rng.gen_range(60..=140);
    (nb * percent / 100).max(1)
}

/// `count` random words, space-separated, lowercase.
pub fn words(rng: &mut (impl Rng + ?Sized), count: usize) -> Vec<&'static str> {
    (0..count).map(|_| pick(rng, WORDS)).collect()
}

/// A capitalized sentence of roughly `nb_words` words, ending in a period.
pub fn sentence(rng: &mut (impl Rng + ?Sized), nb_words: usize) -> String {
    let count = vary(rng, nb_words);
    let mut sentence = capitalize(&words(rng, count).join(" "));
    sentence.push('.');
    sentence
}

/// Text of at most `max_chars` characters.
///
/// Built from whole sentences. When not even one sentence fits, whole words
/// are used instead, and as a last resort a single word is truncated.
pub fn text(rng: &mut (impl Rng + ?Sized), max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let mut out = String::new();
    if max_chars >= 25 {
        loop {
            let next = sentence(rng, 6);
            let needed = if out.is_empty() { next.len() } else { next.len() + 1 };
            if out.len() + needed > max_chars {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&next);
        }
    }

    if out.is_empty() {
        loop {
            let word = pick(rng, WORDS);
            let needed = if out.is_empty() { word.len() } else { word.len() + 1 };
            if out.len() + needed > max_chars {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }

    if out.is_empty() {
        out = pick(rng, WORDS).chars().take(max_chars).collect();
    }

    out
}

/// A "First Last" personal name.
pub fn name(rng: &mut (impl Rng + ?Sized)) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// An email address built from a random name and a reserved test domain.
pub fn email(rng: &mut (impl Rng + ?Sized)) -> String {
    let first = pick(rng, FIRST_NAMES).to_lowercase();
    let last = pick(rng, LAST_NAMES).to_lowercase();
    let domain = pick(rng, EMAIL_DOMAINS);
    match rng.gen_range(0..3) {
        0 => format!("{}.{}@{}", first, last, domain),
        1 => format!("{}{}@{}", &first[..1], last, domain),
        _ => format!("{}{}@{}", first, rng.gen_range(1..100), domain),
    }
}
