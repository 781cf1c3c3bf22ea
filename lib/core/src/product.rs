use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::{Error, Result};

/// Lowest and highest rating a product can carry
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Product identifier as handed over by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Integer(u64),
    Uuid(Uuid),
    String(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::String(s) => write!(f, "{}", s),
            ProductId::Uuid(u) => write!(f, "{}", u),
            ProductId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::String(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::String(s.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(i: u64) -> Self {
        ProductId::Integer(i)
    }
}

impl From<Uuid> for ProductId {
    fn from(u: Uuid) -> Self {
        ProductId::Uuid(u)
    }
}

impl ProductId {
    /// Parse an identifier typed by a user (e.g. a comma separated id list).
    /// Numbers become `Integer`, valid UUIDs become `Uuid`, anything else `String`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(i) = raw.parse::<u64>() {
            ProductId::Integer(i)
        } else if let Ok(u) = Uuid::parse_str(raw) {
            ProductId::Uuid(u)
        } else {
            ProductId::String(raw.to_string())
        }
    }
}

/// A product as stored in the marketplace catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Average rating in [1, 5]; `None` means the product was never rated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub verified: bool,
}

impl ProductRecord {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            rating: None,
            rating_count: 0,
            verified: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_rating(mut self, rating: f64, rating_count: u64) -> Self {
        self.rating = Some(rating);
        self.rating_count = rating_count;
        self
    }

    #[inline]
    #[must_use]
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Rating used for scoring: unrated products count as 0
    #[inline]
    pub fn effective_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Check the record against the catalog's field rules
    pub fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidProduct(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }

        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(Error::InvalidProduct(format!(
                    "product {} rating must be between 1 and 5, got {}",
                    self.id, rating
                )));
            }
        }

        Ok(())
    }
}

/// A product together with the score it earned in the current computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub score: f64,
}

impl ScoredProduct {
    #[inline]
    #[must_use]
    pub fn new(product: ProductRecord, score: f64) -> Self {
        Self { product, score }
    }

    #[inline]
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Highest price in a population, `None` when it is empty
pub fn max_price<'a, I>(products: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    products
        .into_iter()
        .map(|p| p.price)
        .fold(None, |acc, price| match acc {
            Some(max) if max >= price => Some(max),
            _ => Some(price),
        })
}
