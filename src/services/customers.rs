//! Customer management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new customer
    pub async fn create(&self, customer: CreateCustomer) -> AppResult<Customer> {
        customer
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.customers.username_exists(&customer.username).await? {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                customer.username
            )));
        }

        let created = self.repository.customers.create(&customer).await?;
        tracing::info!("Registered customer {} ({})", created.username, created.id);
        Ok(created)
    }

    /// Get customer by ID
    pub async fn get(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    /// List all customers
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        self.repository.customers.list().await
    }
}
