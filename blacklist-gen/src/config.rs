use std::ops::RangeInclusive;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenError;

pub const DEFAULT_ROWS: u32 = 2_000_000;
pub const DEFAULT_OUTPUT: &str = "blacklist_data.csv";

/// Length range of the random letter run at the start of each domain.
pub const DOMAIN_PREFIX_LEN: RangeInclusive<usize> = 5..=10;
pub const MAX_HIT_COUNT: u16 = 1000;

const FIRST_NAMES: [&str; 8] = [
    "John", "Jane", "Mike", "Sarah", "David", "Lisa", "Robert", "Emma",
];
const LAST_NAMES: [&str; 7] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
];
const REASONS: [&str; 8] = [
    "Suspicious activity detected",
    "Known malware distribution",
    "Phishing attempt",
    "Spam source",
    "Fraudulent website",
    "Malicious content",
    "Suspicious behavior",
    "Reported by users",
];

/// The word pools the free-text columns are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub rows: u64,
    pub output: PathBuf,
    /// Fixed seed for reproducible output, `None` draws from OS entropy
    pub seed: Option<u64>,
    pub vocabulary: Vocabulary,
}

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(ToString::to_string).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            first_names: owned(&FIRST_NAMES),
            last_names: owned(&LAST_NAMES),
            reasons: owned(&REASONS),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            rows: u64::from(DEFAULT_ROWS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(rows: u64, output: impl Into<PathBuf>) -> Self {
        GeneratorConfig {
            rows,
            output: output.into(),
            ..GeneratorConfig::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Builds the random source for a run. `ChaCha8Rng` keeps seeded output
    /// identical across platforms and `rand` releases.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// # Errors
/// Errors when `rows` is negative
pub fn validate_row_count(rows: i64) -> Result<u64, GenError> {
    u64::try_from(rows).map_err(|_| GenError::InvalidRowCount(rows))
}
