//! Product CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{status_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result, ShopError},
    lifecycle::engine,
    models::{HistoryEntry, Product, ProductFilter, ProductStatus, Step, StepStatus},
};

const INSERT_PRODUCT_SQL: &str = "INSERT INTO products (name, description, has_invoice, status, registered_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const PRODUCT_COLUMNS: &str = "id, name, description, has_invoice, status, registered_at";
const SELECT_PRODUCT_SQL: &str = "SELECT id, name, description, has_invoice, status, registered_at FROM products WHERE id = ?1";
const UPDATE_PRODUCT_STATUS_SQL: &str = "UPDATE products SET status = ?1 WHERE id = ?2";
const UPDATE_PRODUCT_INVOICE_SQL: &str = "UPDATE products SET has_invoice = ?1 WHERE id = ?2";
const DELETE_PRODUCT_SQL: &str = "DELETE FROM products WHERE id = ?1";
const SELECT_HISTORY_SQL: &str = "SELECT id, product_id, name, description, registered_at, finalized_at FROM product_history ORDER BY id DESC";

impl super::Database {
    /// Helper function to construct a Product (without steps) from a row
    fn build_product_from_row(row: &rusqlite::Row) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            description: row.get(2)?,
            has_invoice: row.get(3)?,
            status: status_at::<ProductStatus>(row, 4)?,
            registered_at: timestamp_at(row, 5)?,
            steps: Vec::new(),
        })
    }

    /// Creates a product together with its initial steps.
    ///
    /// Steps are inserted in the given order, in the same transaction as the
    /// product; a blank step name rolls the whole creation back.
    pub fn create_product(
        &mut self,
        name: &str,
        description: &str,
        has_invoice: bool,
        step_names: &[String],
    ) -> Result<Product> {
        if name.trim().is_empty() {
            return Err(ShopError::invalid_input("name").with_reason("Name is required"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let registered_at = Timestamp::now();

        tx.execute(
            INSERT_PRODUCT_SQL,
            params![
                name,
                description,
                has_invoice,
                ProductStatus::Pending.as_str(),
                registered_at.to_string()
            ],
        )
        .db_context("Failed to insert product")?;

        let id = tx.last_insert_rowid() as u64;

        let mut steps = Vec::with_capacity(step_names.len());
        for step_name in step_names {
            let step_id = engine::create(&*tx, id, step_name)?;
            steps.push(Step {
                id: step_id,
                product_id: id,
                name: step_name.clone(),
                status: StepStatus::Pending,
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Product {
            id,
            name: name.into(),
            description: description.into(),
            has_invoice,
            status: ProductStatus::Pending,
            registered_at,
            steps,
        })
    }

    /// Retrieves a product with its steps.
    pub fn get_product(&self, id: u64) -> Result<Option<Product>> {
        let mut product = self
            .connection
            .query_row(SELECT_PRODUCT_SQL, params![id as i64], Self::build_product_from_row)
            .optional()
            .db_context("Failed to query product")?;

        if let Some(ref mut product) = product {
            product.steps = engine::list_by_product(&self.connection, product.id)?;
        }

        Ok(product)
    }

    /// Lists products newest first, with steps loaded.
    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut query = format!("SELECT {PRODUCT_COLUMNS} FROM products");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref fragment) = filter.name_contains {
            conditions.push("instr(LOWER(name), ?) > 0");
            params_vec.push(Box::new(fragment.to_lowercase()));
        }

        if let Some(ref status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut products = stmt
            .query_map(&params_refs[..], Self::build_product_from_row)
            .db_context("Failed to query products")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch products")?;

        for product in &mut products {
            product.steps = engine::list_by_product(&self.connection, product.id)?;
        }

        Ok(products)
    }

    /// Case-insensitive name search.
    ///
    /// An empty result is reported as `ShopError::NoMatches`.
    pub fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        let term = query.trim();
        if term.is_empty() {
            return Err(ShopError::invalid_input("query").with_reason("Search term is required"));
        }

        let products = self.list_products(&ProductFilter::for_name(term))?;
        if products.is_empty() {
            return Err(ShopError::NoMatches {
                query: term.to_string(),
            });
        }
        Ok(products)
    }

    /// Sets the product status directly. Returns `None` if the product
    /// doesn't exist.
    pub fn update_product_status(&self, id: u64, status: ProductStatus) -> Result<Option<Product>> {
        let updated = self
            .connection
            .execute(UPDATE_PRODUCT_STATUS_SQL, params![status.as_str(), id as i64])
            .db_context("Failed to update product status")?;

        if updated == 0 {
            return Ok(None);
        }
        self.get_product(id)
    }

    /// Sets the invoice flag. Returns `None` if the product doesn't exist.
    pub fn set_invoice(&self, id: u64, has_invoice: bool) -> Result<Option<Product>> {
        let updated = self
            .connection
            .execute(UPDATE_PRODUCT_INVOICE_SQL, params![has_invoice, id as i64])
            .db_context("Failed to update invoice flag")?;

        if updated == 0 {
            return Ok(None);
        }
        self.get_product(id)
    }

    /// Permanently deletes a product; its steps go with it.
    pub fn delete_product(&self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_PRODUCT_SQL, params![id as i64])
            .db_context("Failed to delete product")?;

        if deleted == 0 {
            return Err(ShopError::ProductNotFound { id });
        }
        Ok(())
    }

    /// Finalization records, newest first.
    pub fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map([], |row| {
            Ok(HistoryEntry {
                id: row.get::<_, i64>(0)? as u64,
                product_id: row.get::<_, i64>(1)? as u64,
                name: row.get(2)?,
                description: row.get(3)?,
                registered_at: timestamp_at(row, 4)?,
                finalized_at: timestamp_at(row, 5)?,
            })
        })
        .db_context("Failed to query history")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch history")?;

        Ok(entries)
    }
}
