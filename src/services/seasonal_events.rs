use crate::{
    entities::{product, seasonal_event, Product, SeasonalEvent, SeasonalEventModel},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for seasonal selling events
#[derive(Clone)]
pub struct SeasonalEventService {
    db: Arc<DatabaseConnection>,
}

impl SeasonalEventService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new seasonal event
    #[instrument(skip(self))]
    pub async fn create_event(
        &self,
        input: CreateSeasonalEventInput,
    ) -> Result<SeasonalEventModel, ServiceError> {
        let event = seasonal_event::ActiveModel {
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            ..Default::default()
        };

        let event = event.insert(&*self.db).await?;

        info!("Created seasonal event: {} ({})", event.name, event.id);
        Ok(event)
    }

    /// Get a seasonal event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Uuid) -> Result<SeasonalEventModel, ServiceError> {
        find_event(&*self.db, event_id).await
    }

    /// Update a seasonal event's name or window
    #[instrument(skip(self))]
    pub async fn update_event(
        &self,
        event_id: Uuid,
        input: UpdateSeasonalEventInput,
    ) -> Result<SeasonalEventModel, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let event = find_event(&txn, event_id).await?;
        let mut active: seasonal_event::ActiveModel = event.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }

        let event = active.update(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!("Updated seasonal event: {}", event_id);
        Ok(event)
    }

    /// Delete a seasonal event; products attached to it are kept and detached
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        find_event(&txn, event_id).await?;

        let products = Product::find()
            .filter(product::Column::SeasonalEventId.eq(event_id))
            .all(&txn)
            .await?;
        let detached = products.len();
        for product in products {
            let mut active: product::ActiveModel = product.into();
            active.seasonal_event_id = Set(None);
            active.update(&txn).await?;
        }

        SeasonalEvent::delete_by_id(event_id).exec(&txn).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!(
            "Deleted seasonal event {} (detached {} products)",
            event_id, detached
        );
        Ok(())
    }
}

pub(crate) async fn find_event<C: ConnectionTrait>(
    conn: &C,
    event_id: Uuid,
) -> Result<SeasonalEventModel, ServiceError> {
    SeasonalEvent::find_by_id(event_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Seasonal event {} not found", event_id)))
}

/// Input for creating a seasonal event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeasonalEventInput {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Input for updating a seasonal event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSeasonalEventInput {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
