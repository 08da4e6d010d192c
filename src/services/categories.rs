use crate::{
    entities::{category, product, Category, CategoryModel, Product},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Service for managing the category tree
#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DatabaseConnection>,
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new category, optionally under an existing parent
    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        let db = &*self.db;

        ensure_unique_slug(db, &input.slug, None).await?;
        if let Some(parent_id) = input.parent_id {
            find_category(db, parent_id).await?;
        }

        let category = category::ActiveModel {
            name: Set(input.name),
            slug: Set(input.slug),
            is_active: input.is_active.map(Set).unwrap_or(NotSet),
            parent_id: Set(input.parent_id),
            ..Default::default()
        };

        let category = category.insert(db).await?;

        info!("Created category: {} ({})", category.slug, category.id);
        Ok(category)
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, category_id: Uuid) -> Result<CategoryModel, ServiceError> {
        find_category(&*self.db, category_id).await
    }

    /// Get a category by its slug
    #[instrument(skip(self))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<CategoryModel, ServiceError> {
        Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category with slug {} not found", slug)))
    }

    /// Direct children of a category, ordered by name
    #[instrument(skip(self))]
    pub async fn list_children(
        &self,
        parent_id: Uuid,
    ) -> Result<Vec<CategoryModel>, ServiceError> {
        find_category(&*self.db, parent_id).await?;

        Category::find()
            .filter(category::Column::ParentId.eq(parent_id))
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Ancestor chain of a category, nearest parent first
    #[instrument(skip(self))]
    pub async fn ancestors(&self, category_id: Uuid) -> Result<Vec<CategoryModel>, ServiceError> {
        let category = find_category(&*self.db, category_id).await?;
        load_ancestors(&*self.db, category.id, category.parent_id).await
    }

    /// Update a category; re-parenting is rejected when it would form a cycle
    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let category = find_category(&txn, category_id).await?;

        if let Some(ref slug) = input.slug {
            if *slug != category.slug {
                ensure_unique_slug(&txn, slug, Some(category_id)).await?;
            }
        }

        if let Some(Some(parent_id)) = input.parent_id {
            if parent_id == category_id {
                return Err(ServiceError::ValidationError(
                    "A category cannot be its own parent".to_string(),
                ));
            }
            let parent = find_category(&txn, parent_id).await?;
            let chain = load_ancestors(&txn, parent.id, parent.parent_id).await?;
            if chain.iter().any(|ancestor| ancestor.id == category_id) {
                return Err(ServiceError::ValidationError(format!(
                    "Moving category {} under {} would create a cycle",
                    category_id, parent_id
                )));
            }
        }

        let mut active: category::ActiveModel = category.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(parent_id);
        }

        let category = active.update(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!("Updated category: {}", category_id);
        Ok(category)
    }

    /// Delete a category.
    ///
    /// Fails while the category still has children. Products filed under it
    /// are kept and lose their category.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let category = find_category(&txn, category_id).await?;

        let children = Category::find()
            .filter(category::Column::ParentId.eq(category_id))
            .count(&txn)
            .await?;
        if children > 0 {
            return Err(ServiceError::ConstraintViolation(format!(
                "Cannot delete category {}: it has {} child categories",
                category.slug, children
            )));
        }

        let products = Product::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .all(&txn)
            .await?;
        let detached = products.len();
        for product in products {
            let mut active: product::ActiveModel = product.into();
            active.category_id = Set(None);
            active.update(&txn).await?;
        }

        Category::delete_by_id(category_id).exec(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!(
            "Deleted category {} (detached {} products)",
            category_id, detached
        );
        Ok(())
    }
}

pub(crate) async fn find_category<C: ConnectionTrait>(
    conn: &C,
    category_id: Uuid,
) -> Result<CategoryModel, ServiceError> {
    Category::find_by_id(category_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", category_id)))
}

/// Walks `parent_id` links upward from `start`.
async fn load_ancestors<C: ConnectionTrait>(
    conn: &C,
    start: Uuid,
    mut next: Option<Uuid>,
) -> Result<Vec<CategoryModel>, ServiceError> {
    let mut visited = HashSet::from([start]);
    let mut chain = Vec::new();

    while let Some(parent_id) = next {
        if !visited.insert(parent_id) {
            warn!("Category cycle detected at {}", parent_id);
            break;
        }
        let parent = find_category(conn, parent_id).await?;
        next = parent.parent_id;
        chain.push(parent);
    }

    Ok(chain)
}

async fn ensure_unique_slug<C: ConnectionTrait>(
    conn: &C,
    slug: &str,
    exclude_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut query = Category::find().filter(category::Column::Slug.eq(slug));
    if let Some(id) = exclude_id {
        query = query.filter(category::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(ServiceError::ConstraintViolation(format!(
            "Category slug {} already exists",
            slug
        )));
    }
    Ok(())
}

/// Input for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub slug: String,
    pub is_active: Option<bool>,
    pub parent_id: Option<Uuid>,
}

/// Input for updating a category; `parent_id: Some(None)` moves it to the root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub parent_id: Option<Option<Uuid>>,
}
