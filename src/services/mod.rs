//! Business logic services

pub mod cache;
pub mod catalog;
pub mod customers;
pub mod loans;
pub mod metadata;
pub mod reading_list;

use crate::{
    config::{LoansConfig, MetadataConfig},
    error::AppResult,
    metadata::ProviderChain,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub customers: customers::CustomersService,
    pub loans: loans::LoansService,
    pub metadata: metadata::MetadataService,
    pub reading_list: reading_list::ReadingListService,
    pub cache: cache::CacheService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        loans_config: LoansConfig,
        metadata_config: MetadataConfig,
        http_client: reqwest::Client,
        cache_service: cache::CacheService,
    ) -> AppResult<Self> {
        let chain = ProviderChain::with_defaults(http_client, metadata_config.google_api_key);
        let metadata_service = metadata::MetadataService::new(
            chain,
            cache_service.clone(),
            metadata_config.cache_ttl_seconds,
        );
        let reading_list_service = reading_list::ReadingListService::new(repository.clone());

        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone(), metadata_service.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            loans: loans::LoansService::new(
                repository.clone(),
                loans_config,
                reading_list_service.clone(),
            ),
            metadata: metadata_service,
            reading_list: reading_list_service,
            cache: cache_service,
        })
    }
}
