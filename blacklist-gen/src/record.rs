use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Column names of the output table, in serialization order.
pub const HEADER: [&str; 5] = ["name", "domain", "reason", "category", "hit_count"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Malware,
    Phishing,
    Spam,
    Fraud,
    Other,
}

/// A single synthesized blacklist entry.
///
/// Field order matches [`HEADER`]; the csv serializer relies on it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    /// `<letters><position>.com`, where position is 1-based
    pub domain: String,
    pub reason: String,
    pub category: Category,
    pub hit_count: u16,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Malware,
        Category::Phishing,
        Category::Spam,
        Category::Fraud,
        Category::Other,
    ];
}

impl Distribution<Category> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Category {
        Category::ALL[rng.gen_range(0..Category::ALL.len())]
    }
}
