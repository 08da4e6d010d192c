use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{key_of, overlay_on_stored, validate_not_blank};
use crate::errors::validation_db_err;

/// A dated selling season (e.g. "Black Friday") products can be attached to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "seasonal_events")]
#[validate(schema(function = "validate_event_window", skip_on_field_errors = false))]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[validate(
        length(max = 100, message = "Event name cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub name: String,
}

fn validate_event_window(event: &Model) -> Result<(), ValidationError> {
    if event.start_date > event.end_date {
        let mut err = ValidationError::new("end_date");
        err.message = Some("end_date must not be earlier than start_date".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
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
        } else {
            let id = key_of(&active_model.id)?;
            active_model = overlay_on_stored(db, active_model, id).await?;
        }

        let model: Model = active_model.clone().try_into().map_err(|_| {
            validation_db_err("missing required seasonal event fields (name, start_date, end_date)")
        })?;

        model.validate().map_err(validation_db_err)?;

        Ok(active_model)
    }
}
