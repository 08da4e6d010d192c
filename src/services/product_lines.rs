use crate::{
    entities::{product_image, product_line, ProductImage, ProductLine, ProductLineModel},
    errors::ServiceError,
    services::products::find_product,
};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Service for the sellable lines (variants) of a product
#[derive(Clone)]
pub struct ProductLineService {
    db: Arc<DatabaseConnection>,
}

impl ProductLineService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a product line. A SKU is generated when none is supplied.
    #[instrument(skip(self))]
    pub async fn create_line(
        &self,
        input: CreateProductLineInput,
    ) -> Result<ProductLineModel, ServiceError> {
        let db = &*self.db;

        find_product(db, input.product_id).await?;
        if let Some(sku) = input.sku {
            ensure_unique_sku(db, sku, None).await?;
        }

        let line = product_line::ActiveModel {
            price: Set(input.price),
            sku: input.sku.map(Set).unwrap_or(NotSet),
            stock_qty: input.stock_qty.map(Set).unwrap_or(NotSet),
            is_active: input.is_active.map(Set).unwrap_or(NotSet),
            order: Set(input.order),
            weight: Set(input.weight),
            product_id: Set(input.product_id),
            ..Default::default()
        };

        let line = line.insert(db).await?;
        counter!("catalog.product_lines.created", 1);

        info!(
            "Created product line {} (sku {}) for product {}",
            line.id, line.sku, line.product_id
        );
        Ok(line)
    }

    /// Get a product line by ID
    #[instrument(skip(self))]
    pub async fn get_line(&self, line_id: Uuid) -> Result<ProductLineModel, ServiceError> {
        find_line(&*self.db, line_id).await
    }

    /// Get a product line by SKU
    #[instrument(skip(self))]
    pub async fn get_line_by_sku(&self, sku: Uuid) -> Result<ProductLineModel, ServiceError> {
        ProductLine::find()
            .filter(product_line::Column::Sku.eq(sku))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product line with SKU {} not found", sku))
            })
    }

    /// Lines of a product in display order
    #[instrument(skip(self))]
    pub async fn list_lines(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductLineModel>, ServiceError> {
        find_product(&*self.db, product_id).await?;

        ProductLine::find()
            .filter(product_line::Column::ProductId.eq(product_id))
            .order_by_asc(product_line::Column::Order)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Update a product line
    #[instrument(skip(self))]
    pub async fn update_line(
        &self,
        line_id: Uuid,
        input: UpdateProductLineInput,
    ) -> Result<ProductLineModel, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let line = find_line(&txn, line_id).await?;

        if let Some(sku) = input.sku {
            if sku != line.sku {
                ensure_unique_sku(&txn, sku, Some(line_id)).await?;
            }
        }
        if let Some(product_id) = input.product_id {
            find_product(&txn, product_id).await?;
        }

        let mut active: product_line::ActiveModel = line.into();

        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(stock_qty) = input.stock_qty {
            active.stock_qty = Set(stock_qty);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(order) = input.order {
            active.order = Set(order);
        }
        if let Some(weight) = input.weight {
            active.weight = Set(weight);
        }
        if let Some(product_id) = input.product_id {
            active.product_id = Set(product_id);
        }

        let line = active.update(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!("Updated product line: {}", line_id);
        Ok(line)
    }

    /// Delete a product line together with its images. Returns the number of images removed.
    #[instrument(skip(self))]
    pub async fn delete_line(&self, line_id: Uuid) -> Result<u64, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        find_line(&txn, line_id).await?;

        let images = ProductImage::delete_many()
            .filter(product_image::Column::ProductLineId.eq(line_id))
            .exec(&txn)
            .await?
            .rows_affected;
        debug!("Removed {} images of product line {}", images, line_id);

        ProductLine::delete_by_id(line_id).exec(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;
        counter!("catalog.product_lines.deleted", 1);

        info!("Deleted product line {} and {} images", line_id, images);
        Ok(images)
    }
}

pub(crate) async fn find_line<C: ConnectionTrait>(
    conn: &C,
    line_id: Uuid,
) -> Result<ProductLineModel, ServiceError> {
    ProductLine::find_by_id(line_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product line {} not found", line_id)))
}

async fn ensure_unique_sku<C: ConnectionTrait>(
    conn: &C,
    sku: Uuid,
    exclude_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut query = ProductLine::find().filter(product_line::Column::Sku.eq(sku));
    if let Some(id) = exclude_id {
        query = query.filter(product_line::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(ServiceError::ConstraintViolation(format!(
            "Product line with SKU {} already exists",
            sku
        )));
    }
    Ok(())
}

/// Input for creating a product line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductLineInput {
    pub product_id: Uuid,
    pub price: Decimal,
    pub sku: Option<Uuid>,
    pub stock_qty: Option<i32>,
    pub is_active: Option<bool>,
    pub order: i32,
    pub weight: f64,
}

/// Input for updating a product line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductLineInput {
    pub price: Option<Decimal>,
    pub sku: Option<Uuid>,
    pub stock_qty: Option<i32>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub weight: Option<f64>,
    pub product_id: Option<Uuid>,
}
