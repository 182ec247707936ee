//! Index settings and mappings for the song index.
//!
//! Matches what the music backend expects when it searches the index:
//! searchable text fields carry an `autocomplete` subfield (edge n-grams) and
//! a lowercase-folded `keyword` subfield.

use serde_json::{json, Value};

/// Mapping for a searchable text field with autocomplete and keyword subfields.
fn multi_field() -> Value {
    json!({
        "type": "text",
        "analyzer": "standard",
        "fields": {
            "autocomplete": {
                "type": "text",
                "analyzer": "autocomplete",
                "search_analyzer": "standard"
            },
            "keyword": {
                "type": "keyword",
                "normalizer": "lowercase_fold"
            }
        }
    })
}

/// Get the index settings and mappings for the song index.
///
/// The configuration includes:
/// - **autocomplete** analyzer: edge n-grams (2-20) over lowercased, ASCII-folded tokens
/// - **lowercase_fold** normalizer: for case-insensitive keyword matching
/// - Multi-fields on `title`, `artists`, `album`, `composer` and `tags`
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "filter": {
                    "autocomplete_filter": {
                        "type": "edge_ngram",
                        "min_gram": 2,
                        "max_gram": 20
                    }
                },
                "analyzer": {
                    "autocomplete": {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "asciifolding", "autocomplete_filter"]
                    }
                },
                "normalizer": {
                    "lowercase_fold": {
                        "type": "custom",
                        "filter": ["lowercase", "asciifolding"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "song_id": { "type": "keyword" },
                "title": multi_field(),
                "artists": multi_field(),
                "album": multi_field(),
                "composer": multi_field(),
                "tags": multi_field(),
                "genre": { "type": "keyword", "normalizer": "lowercase_fold" },
                "release_date": { "type": "date", "format": "yyyy-MM-dd" },
                "year": { "type": "integer" },
                "duration_ms": { "type": "integer" },
                "lyrics": { "type": "text" },
                "comment": { "type": "text" },
                "email": { "type": "keyword", "normalizer": "lowercase_fold" }
            }
        }
    })
}
