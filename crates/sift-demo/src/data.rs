//! Reproducible synthetic records.
//!
//! The same seed always yields the same people and locations, so searches
//! can be compared across runs.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::locations::Location;
use crate::people::{Person, UserState};
use sift::DisplayOption;

const GIVEN_NAMES: &[&str] = &[
    "Ada", "Amara", "Ben", "Carmen", "Chidi", "Dana", "Elif", "Farah", "Gustav", "Hana", "Ines",
    "Jonas", "Kofi", "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sven", "Tariq",
    "Uma", "Viktor", "Wen", "Yusuf", "Zoe",
];

const FAMILY_NAMES: &[&str] = &[
    "Abara", "Berg", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ivanova",
    "Jensen", "Kowalski", "Lindqvist", "Mensah", "Nakamura", "Okafor", "Petrov", "Quispe",
    "Rossi", "Sato", "Tanaka", "Urquhart", "Varga", "Weber", "Yilmaz", "Zhang",
];

const MAIL_DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "post.test"];

const STREET_STEMS: &[&str] = &[
    "Acacia", "Birch", "Canal", "Cedar", "Church", "Elm", "Ferry", "Garden", "Harbour", "Hill",
    "King", "Lake", "Maple", "Market", "Mill", "Orchard", "Park", "Queen", "River", "Station",
    "Victoria", "Willow",
];

const STREET_SUFFIXES: &[&str] = &[
    "Avenue", "Close", "Court", "Drive", "Lane", "Place", "Road", "Row", "Square", "Street",
    "Terrace", "Way",
];

const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Brazil", "Canada", "Chile", "Egypt", "Finland", "Ghana", "India",
    "Indonesia", "Japan", "Kenya", "Mexico", "Morocco", "Nigeria", "Norway", "Peru", "Poland",
    "Portugal", "Turkey", "Vietnam",
];

/// Smallest generated population.
pub const MIN_POPULATION: i32 = 100_000;

/// Largest generated population.
pub const MAX_POPULATION: i32 = 10_000_000;

fn pick<'a>(rng: &mut StdRng, words: &'a [&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn person(rng: &mut StdRng) -> Person {
    let given_name = pick(rng, GIVEN_NAMES).to_string();
    let family_name = pick(rng, FAMILY_NAMES).to_string();
    let email_address = format!(
        "{}.{}@{}",
        given_name.to_lowercase(),
        family_name.to_lowercase(),
        pick(rng, MAIL_DOMAINS)
    );
    let state = UserState::ALL
        .choose(rng)
        .copied()
        .unwrap_or(UserState::Active);

    Person {
        given_name,
        family_name,
        email_address,
        is_archived: rng.random_bool(0.5),
        state,
    }
}

fn location(rng: &mut StdRng) -> Location {
    let name = format!("{} {}", pick(rng, STREET_STEMS), pick(rng, STREET_SUFFIXES));
    Location {
        name,
        country: pick(rng, COUNTRIES).to_string(),
        population: Some(rng.random_range(MIN_POPULATION..=MAX_POPULATION)),
    }
}

/// Generates `count` people from `seed`.
pub fn people(seed: u64, count: usize) -> Vec<Person> {
    let mut rng = StdRng::seed_from_u64(seed);
    let people: Vec<Person> = (0..count).map(|_| person(&mut rng)).collect();
    tracing::debug!(seed, count, "generated people");
    people
}

/// Generates `count` locations from `seed`.
///
/// Uses a different stream than [`people`] for the same seed.
pub fn locations(seed: u64, count: usize) -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let locations: Vec<Location> = (0..count).map(|_| location(&mut rng)).collect();
    tracing::debug!(seed, count, "generated locations");
    locations
}
