use std::collections::BTreeMap;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicI32, Ordering},
};

use async_trait::async_trait;
use product::abstract_trait::repository::ProductQueryRepositoryTrait;
use product::domain::requests::product::FindAllProducts;
use product::model::product::Product;
use shared::errors::RepositoryError;

use crate::abstract_trait::repository::{CartCommandRepositoryTrait, CartQueryRepositoryTrait};
use crate::domain::requests::cart::CartItemRequest;
use crate::model::cart::{Cart, CartItem, CartItemExpanded, CartWithItems, CartWithItemsExpanded};

/// Product lookup backed by a plain map, standing in for the Postgres
/// product repository.
pub(crate) struct MockProductLookup {
    products: RwLock<BTreeMap<i32, Product>>,
}

impl MockProductLookup {
    pub(crate) fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
        }
    }

    pub(crate) fn insert(&self, product: Product) {
        self.products
            .write()
            .unwrap()
            .insert(product.product_id, product);
    }
}

pub(crate) fn sample_product(id: i32, code: &str) -> Product {
    Product {
        product_id: id,
        title: format!("Product {id}"),
        description: "a test product".to_string(),
        price: 9.99,
        code: code.to_string(),
        stock: 5,
        category: "general".to_string(),
        status: true,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MockProductLookup {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let products: Vec<Product> = self.products.read().unwrap().values().cloned().collect();
        let total = products.len() as i64;
        let skip = ((req.page - 1).max(0) as usize) * req.page_size as usize;

        Ok((
            products
                .into_iter()
                .skip(skip)
                .take(req.page_size as usize)
                .collect(),
            total,
        ))
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

/// In-memory stand-in for the Postgres cart repositories. Shares the product
/// map so the expanded view can resolve line items against live products.
pub(crate) struct MockCartRepo {
    products: Arc<MockProductLookup>,
    carts: RwLock<BTreeMap<i32, Cart>>,
    items: RwLock<Vec<CartItem>>,
    next_cart_id: AtomicI32,
    next_item_id: AtomicI32,
}

impl MockCartRepo {
    pub(crate) fn new(products: Arc<MockProductLookup>) -> Self {
        Self {
            products,
            carts: RwLock::new(BTreeMap::new()),
            items: RwLock::new(Vec::new()),
            next_cart_id: AtomicI32::new(1),
            next_item_id: AtomicI32::new(1),
        }
    }

    pub(crate) fn seed_cart(&self) -> i32 {
        let id = self.next_cart_id.fetch_add(1, Ordering::SeqCst);
        self.carts.write().unwrap().insert(
            id,
            Cart {
                cart_id: id,
                created_at: None,
                updated_at: None,
            },
        );
        id
    }

    pub(crate) fn seed_item(&self, cart_id: i32, product_id: i32, quantity: i32) {
        let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
        self.items.write().unwrap().push(CartItem {
            cart_item_id: id,
            cart_id,
            product_id,
            quantity,
        });
    }

    pub(crate) fn items_of(&self, cart_id: i32) -> Vec<CartItem> {
        self.items
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for MockCartRepo {
    async fn find_all(&self) -> Result<Vec<CartWithItems>, RepositoryError> {
        let carts = self.carts.read().unwrap();

        Ok(carts
            .values()
            .map(|cart| CartWithItems {
                cart: cart.clone(),
                items: self.items_of(cart.cart_id),
            })
            .collect())
    }

    async fn find_by_id(&self, cart_id: i32) -> Result<Option<CartWithItems>, RepositoryError> {
        let cart = self.carts.read().unwrap().get(&cart_id).cloned();

        Ok(cart.map(|cart| CartWithItems {
            items: self.items_of(cart.cart_id),
            cart,
        }))
    }

    async fn find_by_id_expanded(
        &self,
        cart_id: i32,
    ) -> Result<Option<CartWithItemsExpanded>, RepositoryError> {
        let Some(cart) = self.carts.read().unwrap().get(&cart_id).cloned() else {
            return Ok(None);
        };

        let products = self.products.products.read().unwrap();
        let items = self
            .items_of(cart_id)
            .into_iter()
            .map(|item| {
                let product = products.get(&item.product_id);
                CartItemExpanded {
                    cart_item_id: item.cart_item_id,
                    cart_id: item.cart_id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    p_product_id: product.map(|p| p.product_id),
                    p_title: product.map(|p| p.title.clone()),
                    p_description: product.map(|p| p.description.clone()),
                    p_price: product.map(|p| p.price),
                    p_code: product.map(|p| p.code.clone()),
                    p_stock: product.map(|p| p.stock),
                    p_category: product.map(|p| p.category.clone()),
                    p_status: product.map(|p| p.status),
                    p_created_at: None,
                    p_updated_at: None,
                }
            })
            .collect();

        Ok(Some(CartWithItemsExpanded { cart, items }))
    }

    async fn exists(&self, cart_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.carts.read().unwrap().contains_key(&cart_id))
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for MockCartRepo {
    async fn create(&self) -> Result<Cart, RepositoryError> {
        let id = self.seed_cart();
        Ok(self.carts.read().unwrap()[&id].clone())
    }

    async fn increment_or_insert_item(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.write().unwrap();

        if let Some(item) = items
            .iter_mut()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
        {
            item.quantity += 1;
        } else {
            let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
            items.push(CartItem {
                cart_item_id: id,
                cart_id,
                product_id,
                quantity: 1,
            });
        }

        Ok(())
    }

    async fn remove_item(&self, cart_id: i32, product_id: i32) -> Result<u64, RepositoryError> {
        let mut items = self.items.write().unwrap();
        let before = items.len();
        items.retain(|i| !(i.cart_id == cart_id && i.product_id == product_id));

        Ok((before - items.len()) as u64)
    }

    async fn replace_items(
        &self,
        cart_id: i32,
        new_items: &[CartItemRequest],
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.write().unwrap();
        items.retain(|i| i.cart_id != cart_id);

        for item in new_items {
            let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
            items.push(CartItem {
                cart_item_id: id,
                cart_id,
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }

        Ok(())
    }

    async fn set_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<u64, RepositoryError> {
        let mut items = self.items.write().unwrap();

        match items
            .iter_mut()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
        {
            Some(item) => {
                item.quantity = quantity;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn clear(&self, cart_id: i32) -> Result<(), RepositoryError> {
        self.items.write().unwrap().retain(|i| i.cart_id != cart_id);
        Ok(())
    }
}
