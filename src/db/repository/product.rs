//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate, UserId, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products owned by a user, newest first
    pub async fn find_all_for_user(&self, user: &UserId) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id(TABLE, id)?;
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    /// Find a product by its main name within one user's catalog
    pub async fn find_by_name(&self, user: &UserId, name: &str) -> RepoResult<Option<Product>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE user = $user AND main_product = $name LIMIT 1")
            .bind(("user", user.clone()))
            .bind(("name", name_owned))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, user: &UserId, data: ProductCreate) -> RepoResult<Product> {
        if self.find_by_name(user, &data.main_product).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                data.main_product
            )));
        }

        let product = Product {
            id: None,
            user: user.clone(),
            main_product: data.main_product,
            calculation_mode: data.calculation_mode,
            sub_products: data.sub_products,
            created_at: now_millis(),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let record_id = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.main_product
            && new_name != &existing.main_product
            && self.find_by_name(&existing.user, new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Product '{new_name}' already exists"
            )));
        }

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", record_id))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }
}
