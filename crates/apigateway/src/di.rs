use std::sync::Arc;

use cart::{
    abstract_trait::{
        repository::{DynCartCommandRepository, DynCartQueryRepository},
        service::{DynCartCommandService, DynCartQueryService},
    },
    repository::{command::CartCommandRepository, query::CartQueryRepository},
    service::{CartCommandService, CartQueryService},
};
use product::{
    abstract_trait::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{DynProductCommandService, DynProductQueryService},
    },
    repository::{command::ProductCommandRepository, query::ProductQueryRepository},
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;

/// All repositories and services are wired here once at startup and then
/// handed to the router, so there is no hidden global state.
#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub cart_query: DynCartQueryService,
    pub cart_command: DynCartCommandService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"DynProductQueryService")
            .field("product_command", &"DynProductCommandService")
            .field("cart_query", &"DynCartQueryService")
            .field("cart_command", &"DynCartCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, registry: &mut Registry) -> Self {
        let product_query_repo: DynProductQueryRepository =
            Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_command_repo: DynProductCommandRepository =
            Arc::new(ProductCommandRepository::new(pool.clone()));
        let cart_query_repo: DynCartQueryRepository =
            Arc::new(CartQueryRepository::new(pool.clone()));
        let cart_command_repo: DynCartCommandRepository =
            Arc::new(CartCommandRepository::new(pool));

        let product_query: DynProductQueryService = Arc::new(ProductQueryService::new(
            product_query_repo.clone(),
            registry,
        ));

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            product_query_repo.clone(),
            product_command_repo,
            registry,
        ));

        let cart_query: DynCartQueryService =
            Arc::new(CartQueryService::new(cart_query_repo.clone(), registry));

        let cart_command: DynCartCommandService = Arc::new(CartCommandService::new(
            cart_query_repo,
            cart_command_repo,
            product_query_repo,
            registry,
        ));

        Self {
            product_query,
            product_command,
            cart_query,
            cart_command,
        }
    }
}
