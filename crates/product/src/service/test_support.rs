use crate::abstract_trait::repository::{
    ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
};
use crate::domain::requests::product::{
    CreateProductRequest, FindAllProducts, ProductSort, UpdateProductRequest,
};
use crate::model::product::Product;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::collections::BTreeMap;
use std::sync::{
    RwLock,
    atomic::{AtomicI32, Ordering},
};

/// In-memory stand-in for the Postgres repositories.
pub(crate) struct MockProductRepo {
    products: RwLock<BTreeMap<i32, Product>>,
    next_id: AtomicI32,
}

impl MockProductRepo {
    pub(crate) fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub(crate) fn insert(&self, product: Product) {
        self.next_id
            .fetch_max(product.product_id + 1, Ordering::SeqCst);
        self.products
            .write()
            .unwrap()
            .insert(product.product_id, product);
    }
}

pub(crate) fn sample_product(id: i32, code: &str, price: f64) -> Product {
    Product {
        product_id: id,
        title: format!("Product {id}"),
        description: "a test product".to_string(),
        price,
        code: code.to_string(),
        stock: 5,
        category: "general".to_string(),
        status: true,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MockProductRepo {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let products = self.products.read().unwrap();

        let mut matches: Vec<Product> = products
            .values()
            .filter(|p| {
                req.category.as_ref().is_none_or(|c| &p.category == c)
                    && req.status.is_none_or(|s| p.status == s)
            })
            .cloned()
            .collect();

        match req.sort {
            Some(ProductSort::Asc) => {
                matches.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap());
            }
            Some(ProductSort::Desc) => {
                matches.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap());
            }
            None => {}
        }

        let total = matches.len() as i64;
        let skip = ((req.page - 1).max(0) as usize) * req.page_size as usize;
        let items = matches
            .into_iter()
            .skip(skip)
            .take(req.page_size as usize)
            .collect();

        Ok((items, total))
    }

    async fn find_unpaged(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.read().unwrap().get(&id).cloned())
    }

    async fn find_by_code(
        &self,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .products
            .read()
            .unwrap()
            .values()
            .find(|p| p.code == code && Some(p.product_id) != exclude_id)
            .cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MockProductRepo {
    async fn create(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().unwrap();

        if products.values().any(|p| p.code == req.code) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Product code '{}' already exists",
                req.code
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            product_id: id,
            title: req.title.clone(),
            description: req.description.clone(),
            price: req.price,
            code: req.code.clone(),
            stock: req.stock,
            category: req.category.clone(),
            status: true,
            created_at: None,
            updated_at: None,
        };
        products.insert(id, product.clone());

        Ok(product)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut products = self.products.write().unwrap();

        if let Some(code) = &req.code {
            if products
                .values()
                .any(|p| p.code == *code && p.product_id != id)
            {
                return Err(RepositoryError::AlreadyExists(format!(
                    "Product code '{code}' already exists"
                )));
            }
        }

        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &req.title {
            product.title = title.clone();
        }
        if let Some(description) = &req.description {
            product.description = description.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(code) = &req.code {
            product.code = code.clone();
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        if let Some(status) = req.status {
            product.status = status;
        }

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.write().unwrap().remove(&id))
    }
}
