//! Catalog entities: categories, seasonal events, products, product lines and images.
//!
//! Field rules and system-managed columns are enforced in each entity's
//! `before_save` hook, so every write path goes through the same checks.

pub mod category;
pub mod product;
pub mod product_image;
pub mod product_line;
pub mod seasonal_event;

pub use category::{Entity as Category, Model as CategoryModel};
pub use product::{Entity as Product, Model as ProductModel, StockStatus};
pub use product_image::{Entity as ProductImage, Model as ProductImageModel};
pub use product_line::{Entity as ProductLine, Model as ProductLineModel};
pub use seasonal_event::{Entity as SeasonalEvent, Model as SeasonalEventModel};

use chrono::{DateTime, DurationRound, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityName, EntityTrait,
    IntoActiveModel, Iterable, PrimaryKeyTrait,
};
use uuid::Uuid;
use validator::ValidationError;

use crate::errors::validation_db_err;

/// Maximum length of a slug column.
pub const SLUG_MAX_LENGTH: usize = 50;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

/// Rejects empty or whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("This field cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Accepts letters, numbers, underscores and hyphens only, up to [`SLUG_MAX_LENGTH`].
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if value.len() > SLUG_MAX_LENGTH {
        let mut err = ValidationError::new("slug_length");
        err.message = Some(format!("Slug cannot exceed {} characters", SLUG_MAX_LENGTH).into());
        return Err(err);
    }
    if !SLUG_RE.is_match(value) {
        let mut err = ValidationError::new("slug");
        err.message = Some(
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens".into(),
        );
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_decimal_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("Amount must be non-negative"));
    }
    Ok(())
}

pub(crate) fn validate_finite_non_negative(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(
            "Value must be a finite, non-negative number",
        ));
    }
    Ok(())
}

/// Current time at the precision every supported backend stores.
pub(crate) fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(chrono::Duration::microseconds(1))
        .unwrap_or(now)
}

/// Timestamp for an update that must sort strictly after the stored one.
pub(crate) fn next_timestamp(previous: &ActiveValue<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now_micros();
    match previous {
        ActiveValue::Unchanged(prev) if now <= *prev => *prev + chrono::Duration::microseconds(1),
        _ => now,
    }
}

/// Primary key of an active model about to be updated.
pub(crate) fn key_of(id: &ActiveValue<Uuid>) -> Result<Uuid, DbErr> {
    match id {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Ok(*id),
        ActiveValue::NotSet => Err(validation_db_err("primary key is required for an update")),
    }
}

/// Loads the stored row `id` and applies every `Set` column of `changes` on top.
///
/// Columns the caller did not touch come back `Unchanged`, so the UPDATE only
/// writes what was set while validation sees the complete row.
pub(crate) async fn overlay_on_stored<E, A, C>(db: &C, changes: A, id: Uuid) -> Result<A, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E>,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    let stored = E::find_by_id(id).one(db).await?.ok_or_else(|| {
        DbErr::RecordNotFound(format!("{} {} not found", E::default().table_name(), id))
    })?;

    let mut merged = stored.into_active_model();
    for column in E::Column::iter() {
        if let ActiveValue::Set(value) = changes.get(column) {
            merged.set(column, value);
        }
    }
    Ok(merged)
}
