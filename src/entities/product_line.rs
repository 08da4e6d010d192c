use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{
    key_of, overlay_on_stored, validate_decimal_non_negative, validate_finite_non_negative,
};
use crate::errors::validation_db_err;

/// Sellable variant of a product
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "product_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    #[validate(custom = "validate_decimal_non_negative")]
    pub price: Decimal,

    /// Generated on insert when not supplied
    #[sea_orm(unique)]
    pub sku: Uuid,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_qty: i32,

    pub is_active: bool,

    /// Display position within the product
    pub order: i32,

    #[sea_orm(column_type = "Double")]
    #[validate(custom = "validate_finite_non_negative")]
    pub weight: f64,

    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Product,
    #[sea_orm(has_many = "super::product_image::Entity")]
    ProductImages,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductImages.def()
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
            if let ActiveValue::NotSet = active_model.sku {
                active_model.sku = Set(Uuid::new_v4());
            }
            if let ActiveValue::NotSet = active_model.stock_qty {
                active_model.stock_qty = Set(0);
            }
            if let ActiveValue::NotSet = active_model.is_active {
                active_model.is_active = Set(true);
            }
        } else {
            let id = key_of(&active_model.id)?;
            active_model = overlay_on_stored(db, active_model, id).await?;
        }

        let model: Model = active_model.clone().try_into().map_err(|_| {
            validation_db_err(
                "missing required product line fields (price, order, weight and product_id)",
            )
        })?;

        model.validate().map_err(validation_db_err)?;

        Ok(active_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Model {
        Model {
            id: Uuid::new_v4(),
            price: dec!(49.95),
            sku: Uuid::new_v4(),
            stock_qty: 3,
            is_active: true,
            order: 1,
            weight: 0.8,
            product_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut line = sample();
        line.stock_qty = -1;
        let errors = line.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock_qty"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut line = sample();
        line.price = dec!(-0.01);
        let errors = line.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn infinite_weight_is_rejected() {
        let mut line = sample();
        line.weight = f64::INFINITY;
        assert!(line.validate().is_err());
    }

    #[test]
    fn zero_stock_is_valid() {
        let mut line = sample();
        line.stock_qty = 0;
        assert!(line.validate().is_ok());
    }
}
