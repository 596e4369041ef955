pub mod identifier;
pub mod outcome;
pub mod profile;

pub use identifier::hash_identifier;
pub use outcome::{AuthOutcome, NextStep};
pub use profile::{UserProfile, DEFAULT_ROLE};
