#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use storefront_catalog::{
    config::AppConfig,
    db,
    entities::{CategoryModel, ProductLineModel, ProductModel, SeasonalEventModel},
    services::{
        CatalogServices, CreateCategoryInput, CreateProductInput, CreateProductLineInput,
        CreateSeasonalEventInput,
    },
    DbPool,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper harness backed by a fresh, migrated SQLite database file.
pub struct TestApp {
    pub db: Arc<DbPool>,
    pub services: CatalogServices,
    _dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_path = dir.path().join("catalog_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        let db = Arc::new(pool);

        Self {
            services: CatalogServices::new(db.clone()),
            db,
            _dir: dir,
        }
    }

    pub async fn create_category(&self, slug: &str, parent_id: Option<Uuid>) -> CategoryModel {
        self.services
            .categories
            .create_category(CreateCategoryInput {
                name: format!("Category {}", slug),
                slug: slug.to_string(),
                is_active: None,
                parent_id,
            })
            .await
            .expect("create category")
    }

    pub async fn create_event(&self, name: &str) -> SeasonalEventModel {
        let start = Utc::now();
        self.services
            .seasonal_events
            .create_event(CreateSeasonalEventInput {
                name: name.to_string(),
                start_date: start,
                end_date: start + Duration::days(7),
            })
            .await
            .expect("create seasonal event")
    }

    pub async fn create_product(&self, pid: &str, slug: &str) -> ProductModel {
        self.services
            .products
            .create_product(CreateProductInput::new(pid, format!("Product {}", pid), slug))
            .await
            .expect("create product")
    }

    pub async fn create_line(&self, product_id: Uuid, order: i32) -> ProductLineModel {
        self.services
            .product_lines
            .create_line(CreateProductLineInput {
                product_id,
                price: Decimal::new(1250, 2),
                sku: None,
                stock_qty: None,
                is_active: None,
                order,
                weight: 0.5,
            })
            .await
            .expect("create product line")
    }
}
