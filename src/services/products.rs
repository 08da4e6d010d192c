use crate::{
    entities::{product, product_line, Product, ProductLine, ProductModel, StockStatus},
    errors::ServiceError,
    services::{categories::find_category, seasonal_events::find_event},
};
use metrics::counter;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Product service for managing catalog products
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        let db = &*self.db;

        ensure_unique_pid(db, &input.pid, None).await?;
        ensure_unique_slug(db, &input.slug, None).await?;
        if let Some(category_id) = input.category_id {
            find_category(db, category_id).await?;
        }
        if let Some(event_id) = input.seasonal_event_id {
            find_event(db, event_id).await?;
        }

        let product = product::ActiveModel {
            pid: Set(input.pid),
            name: Set(input.name),
            slug: Set(input.slug),
            description: Set(input.description),
            is_digital: input.is_digital.map(Set).unwrap_or(NotSet),
            is_active: input.is_active.map(Set).unwrap_or(NotSet),
            stock_status: input.stock_status.map(Set).unwrap_or(NotSet),
            category_id: Set(input.category_id),
            seasonal_event_id: Set(input.seasonal_event_id),
            ..Default::default()
        };

        let product = product.insert(db).await?;
        counter!("catalog.products.created", 1);

        info!("Created product: {} ({})", product.pid, product.id);
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductModel, ServiceError> {
        find_product(&*self.db, product_id).await
    }

    /// Get a product by its external identifier
    #[instrument(skip(self))]
    pub async fn get_product_by_pid(&self, pid: &str) -> Result<ProductModel, ServiceError> {
        Product::find()
            .filter(product::Column::Pid.eq(pid))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with PID {} not found", pid)))
    }

    /// Get a product by its slug
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<ProductModel, ServiceError> {
        Product::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with slug {} not found", slug)))
    }

    /// Products filed directly under a category, ordered by name
    #[instrument(skip(self))]
    pub async fn list_products_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        find_category(&*self.db, category_id).await?;

        Product::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .order_by_asc(product::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update an existing product. `updated_at` is refreshed by the entity hook.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let product = find_product(&txn, product_id).await?;

        if let Some(ref pid) = input.pid {
            if *pid != product.pid {
                ensure_unique_pid(&txn, pid, Some(product_id)).await?;
            }
        }
        if let Some(ref slug) = input.slug {
            if *slug != product.slug {
                ensure_unique_slug(&txn, slug, Some(product_id)).await?;
            }
        }
        if let Some(Some(category_id)) = input.category_id {
            find_category(&txn, category_id).await?;
        }
        if let Some(Some(event_id)) = input.seasonal_event_id {
            find_event(&txn, event_id).await?;
        }

        let mut active: product::ActiveModel = product.into();

        if let Some(pid) = input.pid {
            active.pid = Set(pid);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_digital) = input.is_digital {
            active.is_digital = Set(is_digital);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(stock_status) = input.stock_status {
            active.stock_status = Set(stock_status);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(event_id) = input.seasonal_event_id {
            active.seasonal_event_id = Set(event_id);
        }

        let product = active.update(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!("Updated product: {}", product_id);
        Ok(product)
    }

    /// Delete a product. Refused while any product line still belongs to it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let product = find_product(&txn, product_id).await?;

        let lines = ProductLine::find()
            .filter(product_line::Column::ProductId.eq(product_id))
            .count(&txn)
            .await?;
        if lines > 0 {
            return Err(ServiceError::ConstraintViolation(format!(
                "Cannot delete product {}: it still has {} product lines",
                product.pid, lines
            )));
        }

        Product::delete_by_id(product_id).exec(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;
        counter!("catalog.products.deleted", 1);

        info!("Deleted product {}", product_id);
        Ok(())
    }
}

pub(crate) async fn find_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> Result<ProductModel, ServiceError> {
    Product::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
}

async fn ensure_unique_pid<C: ConnectionTrait>(
    conn: &C,
    pid: &str,
    exclude_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut query = Product::find().filter(product::Column::Pid.eq(pid));
    if let Some(id) = exclude_id {
        query = query.filter(product::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(ServiceError::ConstraintViolation(format!(
            "Product with PID {} already exists",
            pid
        )));
    }
    Ok(())
}

async fn ensure_unique_slug<C: ConnectionTrait>(
    conn: &C,
    slug: &str,
    exclude_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut query = Product::find().filter(product::Column::Slug.eq(slug));
    if let Some(id) = exclude_id {
        query = query.filter(product::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(ServiceError::ConstraintViolation(format!(
            "Product slug {} already exists",
            slug
        )));
    }
    Ok(())
}

/// Input for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub pid: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_digital: Option<bool>,
    pub is_active: Option<bool>,
    pub stock_status: Option<StockStatus>,
    pub category_id: Option<Uuid>,
    pub seasonal_event_id: Option<Uuid>,
}

impl CreateProductInput {
    /// Minimal input: every optional attribute left to its default.
    pub fn new(pid: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            is_digital: None,
            is_active: None,
            stock_status: None,
            category_id: None,
            seasonal_event_id: None,
        }
    }
}

/// Input for updating a product. Nested options clear a nullable field with `Some(None)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub pid: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    pub is_digital: Option<bool>,
    pub is_active: Option<bool>,
    pub stock_status: Option<StockStatus>,
    #[serde(default)]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub seasonal_event_id: Option<Option<Uuid>>,
}
