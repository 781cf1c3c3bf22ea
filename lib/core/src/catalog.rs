use crate::filter::{IdIn, ProductFilter, TextQuery, Verified};
use crate::{Error, ProductId, ProductRecord, Result, MAX_RATING, MIN_RATING};
use ahash::AHashMap;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// In-memory product catalog
///
/// Keeps records in insertion order: ranking ties are broken by that order,
/// so it has to be stable across calls.
pub struct Catalog {
    products: Arc<RwLock<Vec<ProductRecord>>>,
    // product id (as string) -> position in `products`
    index: Arc<RwLock<AHashMap<String, usize>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
            index: Arc::new(RwLock::new(AHashMap::new())),
        }
    }

    /// Build a catalog from records, validating each one
    pub fn from_products<I: IntoIterator<Item = ProductRecord>>(products: I) -> Result<Self> {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product)?;
        }
        Ok(catalog)
    }

    /// Load a JSON array of product documents
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let products: Vec<ProductRecord> = serde_json::from_slice(&data)?;
        tracing::debug!("Loaded {} products from {:?}", products.len(), path.as_ref());
        Self::from_products(products)
    }

    pub fn count(&self) -> usize {
        self.products.read().len()
    }

    /// Insert or replace a product; a replaced product keeps its position
    pub fn upsert(&self, product: ProductRecord) -> Result<()> {
        product.validate()?;

        let key = product.id.to_string();
        let mut products = self.products.write();
        let mut index = self.index.write();

        match index.get(&key) {
            Some(&pos) => products[pos] = product,
            None => {
                index.insert(key, products.len());
                products.push(product);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &ProductId) -> Option<ProductRecord> {
        let products = self.products.read();
        let index = self.index.read();
        index.get(&id.to_string()).map(|&pos| products[pos].clone())
    }

    pub fn delete(&self, id: &ProductId) -> Result<bool> {
        let key = id.to_string();
        let mut products = self.products.write();
        let mut index = self.index.write();

        let Some(pos) = index.remove(&key) else {
            return Ok(false);
        };
        products.remove(pos);
        for slot in index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(true)
    }

    /// Flip the verified flag, returning the new value
    pub fn toggle_verified(&self, id: &ProductId) -> Result<bool> {
        // lock order: products, then index
        let mut products = self.products.write();
        let index = self.index.read();
        let pos = *index
            .get(&id.to_string())
            .ok_or_else(|| Error::ProductNotFound(id.to_string()))?;

        let product = &mut products[pos];
        product.verified = !product.verified;
        Ok(product.verified)
    }

    /// Fold a buyer's rating into the product's running average.
    ///
    /// An unrated product takes `rating` as its first rating, whatever its
    /// stored count. Returns the updated record.
    pub fn rate(&self, id: &ProductId, rating: f64) -> Result<ProductRecord> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::InvalidProduct(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }

        // lock order: products, then index
        let mut products = self.products.write();
        let index = self.index.read();
        let pos = *index
            .get(&id.to_string())
            .ok_or_else(|| Error::ProductNotFound(id.to_string()))?;

        let product = &mut products[pos];
        match product.rating {
            Some(current) => {
                let total = current * product.rating_count as f64;
                product.rating_count += 1;
                product.rating = Some((total + rating) / product.rating_count as f64);
            }
            None => {
                product.rating = Some(rating);
                product.rating_count = 1;
            }
        }

        tracing::debug!(
            product = %product.id,
            rating = ?product.rating,
            rating_count = product.rating_count,
            "rated product"
        );
        Ok(product.clone())
    }

    /// Products accepted by `filter`, in catalog order
    pub fn filter(&self, filter: &dyn ProductFilter) -> Vec<ProductRecord> {
        self.products
            .read()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Products eligible for ranking and search
    pub fn verified(&self) -> Vec<ProductRecord> {
        self.filter(&Verified)
    }

    /// Verified products whose name or description contains `query`.
    /// Every call scans the full verified set; there is no text index.
    pub fn search(&self, query: &str) -> Vec<ProductRecord> {
        let query = TextQuery::new(query);
        self.products
            .read()
            .iter()
            .filter(|p| Verified.matches(p) && query.matches(p))
            .cloned()
            .collect()
    }

    /// Products with the given ids, verified or not, in catalog order
    pub fn get_many(&self, ids: &[ProductId]) -> Vec<ProductRecord> {
        self.filter(&IdIn::new(ids.iter().cloned()))
    }

    /// Copy of every record, in catalog order
    pub fn all(&self) -> Vec<ProductRecord> {
        self.products.read().clone()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
