// Catalog services
pub mod categories;
pub mod product_images;
pub mod product_lines;
pub mod products;
pub mod seasonal_events;

pub use categories::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use product_images::{CreateProductImageInput, ProductImageService, UpdateProductImageInput};
pub use product_lines::{CreateProductLineInput, ProductLineService, UpdateProductLineInput};
pub use products::{CreateProductInput, ProductService, UpdateProductInput};
pub use seasonal_events::{
    CreateSeasonalEventInput, SeasonalEventService, UpdateSeasonalEventInput,
};

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Service container holding one service per catalog entity
#[derive(Clone)]
pub struct CatalogServices {
    pub categories: Arc<CategoryService>,
    pub seasonal_events: Arc<SeasonalEventService>,
    pub products: Arc<ProductService>,
    pub product_lines: Arc<ProductLineService>,
    pub product_images: Arc<ProductImageService>,
}

impl CatalogServices {
    /// Creates every catalog service over the shared connection pool
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(db.clone())),
            seasonal_events: Arc::new(SeasonalEventService::new(db.clone())),
            products: Arc::new(ProductService::new(db.clone())),
            product_lines: Arc::new(ProductLineService::new(db.clone())),
            product_images: Arc::new(ProductImageService::new(db)),
        }
    }
}
