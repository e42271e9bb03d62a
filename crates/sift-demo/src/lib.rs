//! Two concrete searches built on [`sift`]: people and locations.
//!
//! Each search module defines its record type, the record's sortable-field
//! registration, a parameter struct and a [`sift::SearchHandler`]. The data
//! is synthetic and reproducible from a seed (see [`data`]).

pub mod config;
pub mod data;
pub mod locations;
pub mod people;
pub mod report;

pub use config::{ConfigError, DemoConfig};
pub use locations::{Location, LocationParams, LocationSearch, PopulationBucket};
pub use people::{PeopleParams, PeopleSearch, Person, UserState};
