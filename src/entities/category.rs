use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{key_of, overlay_on_stored, validate_not_blank, validate_slug};
use crate::errors::validation_db_err;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "categories")]
#[validate(schema(function = "validate_not_own_parent", skip_on_field_errors = false))]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(
        length(max = 100, message = "Category name cannot exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    #[sea_orm(unique)]
    #[validate(custom = "validate_slug")]
    pub slug: String,

    pub is_active: bool,

    /// Root categories have no parent.
    #[sea_orm(nullable)]
    pub parent_id: Option<Uuid>,
}

fn validate_not_own_parent(category: &Model) -> Result<(), ValidationError> {
    if category.parent_id == Some(category.id) {
        let mut err = ValidationError::new("parent_id");
        err.message = Some("A category cannot be its own parent".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Parent,

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
            if let ActiveValue::NotSet = active_model.is_active {
                active_model.is_active = Set(true);
            }
            if let ActiveValue::NotSet = active_model.parent_id {
                active_model.parent_id = Set(None);
            }
        } else {
            let id = key_of(&active_model.id)?;
            active_model = overlay_on_stored(db, active_model, id).await?;
        }

        let model: Model = active_model
            .clone()
            .try_into()
            .map_err(|_| validation_db_err("missing required category fields (name and slug)"))?;

        model.validate().map_err(validation_db_err)?;

        Ok(active_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_parent_is_rejected() {
        let id = Uuid::new_v4();
        let category = Model {
            id,
            name: "Shoes".into(),
            slug: "shoes".into(),
            is_active: true,
            parent_id: Some(id),
        };
        assert!(category.validate().is_err());
    }

    #[test]
    fn root_category_is_valid() {
        let category = Model {
            id: Uuid::new_v4(),
            name: "Shoes".into(),
            slug: "shoes".into(),
            is_active: true,
            parent_id: None,
        };
        assert!(category.validate().is_ok());
    }
}
