use crate::models::product::Product;
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedProductStore = Arc<ProductStore>;

#[derive(Debug)]
struct Inner {
    products: HashMap<String, Product>,
    next_id: u64,
}

/// In-memory table of every product, keyed by its id.
///
/// Ids are minted from a counter starting at 1. Assigning an id and
/// inserting the record happen under one write lock, so readers never see
/// one without the other.
#[derive(Debug)]
pub struct ProductStore {
    inner: RwLock<Inner>,
}

impl ProductStore {
    pub fn new() -> Self {
        ProductStore {
            inner: RwLock::new(Inner {
                products: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn create<S: Into<String>>(&self, name: S, price: f64, quantity: i64) -> anyhow::Result<Product> {
        let mut inner = self.write()?;

        let product = Product {
            id: inner.next_id.to_string(),
            name: name.into(),
            price,
            quantity,
        };

        inner.next_id += 1;
        inner.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    pub fn get<S: AsRef<str>>(&self, id: S) -> anyhow::Result<Option<Product>> {
        Ok(self.read()?.products.get(id.as_ref()).cloned())
    }

    pub fn len(&self) -> anyhow::Result<usize> {
        Ok(self.read()?.products.len())
    }

    fn read(&self) -> anyhow::Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("product store lock poisoned"))
    }

    fn write(&self) -> anyhow::Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("product store lock poisoned"))
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        ProductStore::new()
    }
}
