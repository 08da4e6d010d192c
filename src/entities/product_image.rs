use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{key_of, overlay_on_stored, validate_not_blank};
use crate::errors::validation_db_err;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(
        length(max = 100, message = "Image name cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    #[validate(
        length(max = 100, message = "Alternative text cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub alternative_text: String,

    /// Storage path or URL of the image asset
    #[validate(
        length(max = 100, message = "Image reference cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub url: String,

    pub order: i32,

    pub product_line_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_line::Entity",
        from = "Column::ProductLineId",
        to = "super::product_line::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ProductLine,
}

impl Related<super::product_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductLine.def()
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

        let model: Model = active_model
            .clone()
            .try_into()
            .map_err(|_| validation_db_err("missing required product image fields"))?;

        model.validate().map_err(validation_db_err)?;

        Ok(active_model)
    }
}
