pub mod alphabet;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod hash;
pub mod selector;

pub use alphabet::{AlphabetBuilder, AlphabetOp, CharacterGroups};
pub use entropy::EntropyAccumulator;
pub use error::Error;
pub use generator::{GenerationJob, Progress, generate, generate_with_progress};
pub use selector::select;
