//! Product operations for the Workshop.

use log::debug;

use super::Workshop;
use crate::{
    display::{History, Products},
    error::{Result, ShopError},
    events::PRODUCT_CREATED,
    models::{Product, ProductFilter},
    params::{CreateProduct, Id, ListProducts, SearchProducts, SetInvoice, UpdateProductStatus},
};

impl Workshop {
    /// Creates a product and its inline steps in one transaction.
    ///
    /// Publishes `product_created` once the product is stored.
    ///
    /// # Errors
    ///
    /// * `ShopError::InvalidInput` - When the product name or a step name is
    ///   blank; nothing is stored
    pub async fn create_product(&self, params: &CreateProduct) -> Result<Product> {
        params.validate()?;
        debug!("Creating product '{}'", params.name);

        let name = params.name.clone();
        let description = params.description.clone().unwrap_or_default();
        let has_invoice = params.has_invoice;
        let step_names: Vec<String> = params.steps.iter().map(|s| s.name.clone()).collect();

        let product = self
            .with_database(move |db| {
                db.create_product(&name, &description, has_invoice, &step_names)
            })
            .await?;

        self.publish(PRODUCT_CREATED, &product);
        Ok(product)
    }

    /// Retrieves a product with its steps.
    pub async fn get_product(&self, params: &Id) -> Result<Product> {
        let id = params.id;
        self.with_database(move |db| db.get_product(id))
            .await?
            .ok_or(ShopError::ProductNotFound { id })
    }

    /// Lists products newest first, optionally restricted to one status.
    pub async fn list_products(&self, params: &ListProducts) -> Result<Products> {
        let filter = ProductFilter {
            status: params.validate()?,
            ..Default::default()
        };
        let products = self.with_database(move |db| db.list_products(&filter)).await?;
        Ok(Products(products))
    }

    /// Case-insensitive search on product names.
    ///
    /// # Errors
    ///
    /// * `ShopError::InvalidInput` - When the search term is blank
    /// * `ShopError::NoMatches` - When no product name contains the term
    pub async fn search_products(&self, params: &SearchProducts) -> Result<Products> {
        params.validate()?;
        let query = params.query.clone();
        let products = self
            .with_database(move |db| db.search_products(&query))
            .await?;
        Ok(Products(products))
    }

    /// Sets a product's status directly, outside the step cascade.
    pub async fn update_product_status(&self, params: &UpdateProductStatus) -> Result<Product> {
        let status = params.validate()?;
        let id = params.id;
        self.with_database(move |db| db.update_product_status(id, status))
            .await?
            .ok_or(ShopError::ProductNotFound { id })
    }

    /// Records whether the product has been invoiced.
    pub async fn set_invoice(&self, params: &SetInvoice) -> Result<Product> {
        let id = params.id;
        let has_invoice = params.has_invoice;
        self.with_database(move |db| db.set_invoice(id, has_invoice))
            .await?
            .ok_or(ShopError::ProductNotFound { id })
    }

    /// Permanently deletes a product and its steps, returning what was
    /// removed.
    ///
    /// Finalization history is kept.
    pub async fn delete_product(&self, params: &Id) -> Result<Product> {
        let id = params.id;
        self.with_database(move |db| {
            let product = db.get_product(id)?.ok_or(ShopError::ProductNotFound { id })?;
            db.delete_product(id)?;
            Ok(product)
        })
        .await
    }

    /// Finalized products, most recent first.
    pub async fn list_history(&self) -> Result<History> {
        let entries = self.with_database(|db| db.list_history()).await?;
        Ok(History(entries))
    }
}
