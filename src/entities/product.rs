use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::{
    key_of, next_timestamp, now_micros, overlay_on_stored, validate_not_blank, validate_slug,
};
use crate::errors::validation_db_err;

pub const VERBOSE_NAME: &str = "Product";
pub const VERBOSE_NAME_PLURAL: &str = "Products";

/// Availability of a product, stored as a short code.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[sea_orm(string_value = "IS")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[default]
    #[sea_orm(string_value = "OOS")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    #[sea_orm(string_value = "BO")]
    #[strum(serialize = "Back Ordered")]
    Backordered,
}

impl StockStatus {
    /// Storage code written to the `stock_status` column.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InStock => "IS",
            Self::OutOfStock => "OOS",
            Self::Backordered => "BO",
        }
    }
}

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// External product identifier
    #[sea_orm(unique)]
    #[validate(
        length(max = 255, message = "PID cannot exceed 255 characters"),
        custom = "validate_not_blank"
    )]
    pub pid: String,

    /// Product name
    #[validate(
        length(max = 100, message = "Product name cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    /// URL-safe identifier
    #[sea_orm(unique)]
    #[validate(custom = "validate_slug")]
    pub slug: String,

    /// Product description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Is the product digital (non-physical)
    pub is_digital: bool,

    /// Is the product active
    pub is_active: bool,

    pub stock_status: StockStatus,

    #[sea_orm(nullable)]
    pub category_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub seasonal_event_id: Option<Uuid>,

    /// Set once on insert
    pub created_at: DateTime<Utc>,

    /// Refreshed on every save
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::seasonal_event::Entity",
        from = "Column::SeasonalEventId",
        to = "super::seasonal_event::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    SeasonalEvent,
    #[sea_orm(has_many = "super::product_line::Entity")]
    ProductLines,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::seasonal_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonalEvent.def()
    }
}

impl Related<super::product_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductLines.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.id {
                active_model.id = Set(Uuid::new_v4());
            }

            if let ActiveValue::NotSet = active_model.is_active {
                active_model.is_active = Set(true);
            }

            if let ActiveValue::NotSet = active_model.is_digital {
                active_model.is_digital = Set(false);
            }

            if let ActiveValue::NotSet = active_model.stock_status {
                active_model.stock_status = Set(StockStatus::default());
            }

            if let ActiveValue::NotSet = active_model.description {
                active_model.description = Set(None);
            }
            if let ActiveValue::NotSet = active_model.category_id {
                active_model.category_id = Set(None);
            }
            if let ActiveValue::NotSet = active_model.seasonal_event_id {
                active_model.seasonal_event_id = Set(None);
            }

            let now = now_micros();
            active_model.created_at = Set(now);
            active_model.updated_at = Set(now);
        } else {
            // Timestamps are system-managed; caller values never reach the row.
            active_model.created_at = ActiveValue::NotSet;
            active_model.updated_at = ActiveValue::NotSet;

            let id = key_of(&active_model.id)?;
            active_model = overlay_on_stored(db, active_model, id).await?;
            active_model.updated_at = Set(next_timestamp(&active_model.updated_at));
        }

        let model: Model = active_model.clone().try_into().map_err(|_| {
            validation_db_err("missing required product fields (pid, name and slug are required)")
        })?;

        model.validate().map_err(validation_db_err)?;

        Ok(active_model)
    }
}
