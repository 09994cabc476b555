//! Upstream weather feed adapters

mod ilmateenistus;

pub use ilmateenistus::{parse_observations, IlmateenistusFeed};
