use rand::Rng;

use crate::config::{Vocabulary, DOMAIN_PREFIX_LEN, MAX_HIT_COUNT};
use crate::error::GenError;
use crate::record::{Category, Record};

const LOWERCASE: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Samples [`Record`]s field by field from a [`Vocabulary`] and an explicit
/// random source.
#[derive(Debug)]
pub struct RowGenerator<'a, R> {
    vocabulary: &'a Vocabulary,
    rng: R,
}

/// Lazily yields the records for indices `next..end`, in order.
#[derive(Debug)]
pub struct Rows<'a, R> {
    generator: RowGenerator<'a, R>,
    next: u64,
    end: u64,
}

fn pick<'v, R: Rng>(rng: &mut R, pool: &'v [String]) -> &'v str {
    &pool[rng.gen_range(0..pool.len())]
}

impl<'a, R: Rng> RowGenerator<'a, R> {
    /// # Errors
    /// Errors when any of the vocabulary pools is empty
    pub fn new(vocabulary: &'a Vocabulary, rng: R) -> Result<Self, GenError> {
        if vocabulary.first_names.is_empty() {
            return Err(GenError::EmptyVocabulary("first name"));
        }
        if vocabulary.last_names.is_empty() {
            return Err(GenError::EmptyVocabulary("last name"));
        }
        if vocabulary.reasons.is_empty() {
            return Err(GenError::EmptyVocabulary("reason"));
        }
        Ok(RowGenerator { vocabulary, rng })
    }

    pub fn generate_name(&mut self) -> String {
        let first = pick(&mut self.rng, &self.vocabulary.first_names);
        let last = pick(&mut self.rng, &self.vocabulary.last_names);
        format!("{} {}", first, last)
    }

    pub fn generate_reason(&mut self) -> String {
        pick(&mut self.rng, &self.vocabulary.reasons).to_owned()
    }

    /// The numeric suffix is `index + 1`, which keeps domains unique even when
    /// the letter prefixes collide.
    pub fn generate_domain(&mut self, index: u64) -> String {
        let len = self.rng.gen_range(DOMAIN_PREFIX_LEN);
        let mut domain: String = (0..len)
            .map(|_| char::from(LOWERCASE[self.rng.gen_range(0..LOWERCASE.len())]))
            .collect();
        // widened so u64::MAX still gets a distinct suffix
        domain.push_str(&(u128::from(index) + 1).to_string());
        domain.push_str(".com");
        domain
    }

    pub fn generate_category(&mut self) -> Category {
        self.rng.gen()
    }

    pub fn generate_hit_count(&mut self) -> u16 {
        self.rng.gen_range(0..=MAX_HIT_COUNT)
    }

    pub fn generate_row(&mut self, index: u64) -> Record {
        let name = self.generate_name();
        let domain = self.generate_domain(index);
        let reason = self.generate_reason();
        let category = self.generate_category();
        let hit_count = self.generate_hit_count();
        Record {
            name,
            domain,
            reason,
            category,
            hit_count,
        }
    }

    /// Consumes the generator into an iterator over the first `n` rows.
    /// Records are produced on demand, nothing is buffered.
    #[must_use]
    pub fn generate_all(self, n: u64) -> Rows<'a, R> {
        Rows {
            generator: self,
            next: 0,
            end: n,
        }
    }
}

impl<R: Rng> Iterator for Rows<'_, R> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let record = self.generator.generate_row(self.next);
        self.next += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
