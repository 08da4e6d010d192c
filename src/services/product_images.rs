use crate::{
    entities::{product_image, ProductImage, ProductImageModel},
    errors::ServiceError,
    services::product_lines::find_line,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductImageService {
    db: Arc<DatabaseConnection>,
}

impl ProductImageService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attach an image to a product line
    #[instrument(skip(self))]
    pub async fn create_image(
        &self,
        input: CreateProductImageInput,
    ) -> Result<ProductImageModel, ServiceError> {
        find_line(&*self.db, input.product_line_id).await?;

        let image = product_image::ActiveModel {
            name: Set(input.name),
            alternative_text: Set(input.alternative_text),
            url: Set(input.url),
            order: Set(input.order),
            product_line_id: Set(input.product_line_id),
            ..Default::default()
        };

        let image = image.insert(&*self.db).await?;

        info!(
            "Created image {} for product line {}",
            image.id, image.product_line_id
        );
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn get_image(&self, image_id: Uuid) -> Result<ProductImageModel, ServiceError> {
        find_image(&*self.db, image_id).await
    }

    /// Images of a product line in display order
    #[instrument(skip(self))]
    pub async fn list_images(
        &self,
        product_line_id: Uuid,
    ) -> Result<Vec<ProductImageModel>, ServiceError> {
        find_line(&*self.db, product_line_id).await?;

        ProductImage::find()
            .filter(product_image::Column::ProductLineId.eq(product_line_id))
            .order_by_asc(product_image::Column::Order)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_image(
        &self,
        image_id: Uuid,
        input: UpdateProductImageInput,
    ) -> Result<ProductImageModel, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let image = find_image(&txn, image_id).await?;
        if let Some(line_id) = input.product_line_id {
            find_line(&txn, line_id).await?;
        }

        let mut active: product_image::ActiveModel = image.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(alternative_text) = input.alternative_text {
            active.alternative_text = Set(alternative_text);
        }
        if let Some(url) = input.url {
            active.url = Set(url);
        }
        if let Some(order) = input.order {
            active.order = Set(order);
        }
        if let Some(line_id) = input.product_line_id {
            active.product_line_id = Set(line_id);
        }

        let image = active.update(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!("Updated image: {}", image_id);
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, image_id: Uuid) -> Result<(), ServiceError> {
        let result = ProductImage::delete_by_id(image_id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product image {} not found",
                image_id
            )));
        }

        info!("Deleted image {}", image_id);
        Ok(())
    }
}

async fn find_image<C: ConnectionTrait>(
    conn: &C,
    image_id: Uuid,
) -> Result<ProductImageModel, ServiceError> {
    ProductImage::find_by_id(image_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product image {} not found", image_id)))
}

/// Input for attaching an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductImageInput {
    pub product_line_id: Uuid,
    pub name: String,
    pub alternative_text: String,
    pub url: String,
    pub order: i32,
}

/// Input for updating an image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductImageInput {
    pub name: Option<String>,
    pub alternative_text: Option<String>,
    pub url: Option<String>,
    pub order: Option<i32>,
    pub product_line_id: Option<Uuid>,
}
