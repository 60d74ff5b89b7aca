pub mod aggregate;
pub mod combined;
pub mod engine;
pub mod pairing;
pub mod parser;
pub mod ranking;
pub mod types;

pub use engine::{compute_individual, compute_results, compute_team, score_entry};
pub use parser::{parse_scores, rejected_tokens};
pub use types::*;
