// Product filters used to narrow the catalog before ranking or search
use crate::matcher::BoyerMoore;
use crate::product::{ProductId, ProductRecord};
use ahash::AHashSet;

pub trait ProductFilter {
    fn matches(&self, product: &ProductRecord) -> bool;
}

/// Only products approved by an admin
pub struct Verified;

impl ProductFilter for Verified {
    fn matches(&self, product: &ProductRecord) -> bool {
        product.verified
    }
}

/// Case-insensitive substring query over name and description
pub struct TextQuery {
    matcher: BoyerMoore,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        Self {
            matcher: BoyerMoore::new(&query.to_lowercase()),
        }
    }
}

impl ProductFilter for TextQuery {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.matcher.is_match(&product.description.to_lowercase())
            || self.matcher.is_match(&product.name.to_lowercase())
    }
}

/// Products whose id is in a given set.
/// Ids compare by their string form, so `7` and `"7"` name the same product.
pub struct IdIn {
    ids: AHashSet<String>,
}

impl IdIn {
    pub fn new<I: IntoIterator<Item = ProductId>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl ProductFilter for IdIn {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.ids.contains(&product.id.to_string())
    }
}

/// Conjunction of filters
pub struct All(pub Vec<Box<dyn ProductFilter + Send + Sync>>);

impl ProductFilter for All {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.0.iter().all(|f| f.matches(product))
    }
}
