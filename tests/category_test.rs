mod common;

use assert_matches::assert_matches;
use rstest::rstest;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use storefront_catalog::{
    entities::{category, Category},
    services::{CreateCategoryInput, CreateProductInput, UpdateCategoryInput},
    ServiceError,
};
use uuid::Uuid;

#[tokio::test]
async fn category_defaults_and_slug_lookup() {
    let app = common::TestApp::new().await;
    let category = app.create_category("outdoor", None).await;

    assert!(category.is_active);
    assert_eq!(category.parent_id, None);

    let found = app
        .services
        .categories
        .get_category_by_slug("outdoor")
        .await
        .unwrap();
    assert_eq!(found, category);
}

#[tokio::test]
async fn duplicate_category_slug_is_rejected() {
    let app = common::TestApp::new().await;
    app.create_category("garden", None).await;

    let err = app
        .services
        .categories
        .create_category(CreateCategoryInput {
            name: "Garden again".into(),
            slug: "garden".into(),
            is_active: Some(false),
            parent_id: None,
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ConstraintViolation(_));
}

#[tokio::test]
async fn missing_parent_is_not_found() {
    let app = common::TestApp::new().await;

    let err = app
        .services
        .categories
        .create_category(CreateCategoryInput {
            name: "Orphan".into(),
            slug: "orphan".into(),
            is_active: None,
            parent_id: Some(Uuid::new_v4()),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn children_and_ancestors() {
    let app = common::TestApp::new().await;
    let root = app.create_category("clothing", None).await;
    let mens = app.create_category("mens", Some(root.id)).await;
    let shirts = app.create_category("shirts", Some(mens.id)).await;
    app.create_category("womens", Some(root.id)).await;

    let children = app.services.categories.list_children(root.id).await.unwrap();
    let slugs: Vec<_> = children.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["mens", "womens"]);

    let chain = app.services.categories.ancestors(shirts.id).await.unwrap();
    let ids: Vec<_> = chain.iter().map(|c| c.id).collect();
    assert_eq!(ids, [mens.id, root.id]);

    assert!(app.services.categories.ancestors(root.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn reparenting_under_a_descendant_is_rejected() {
    let app = common::TestApp::new().await;
    let root = app.create_category("home", None).await;
    let kitchen = app.create_category("kitchen", Some(root.id)).await;
    let knives = app.create_category("knives", Some(kitchen.id)).await;

    let err = app
        .services
        .categories
        .update_category(
            root.id,
            UpdateCategoryInput {
                parent_id: Some(Some(knives.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services
        .categories
        .update_category(
            kitchen.id,
            UpdateCategoryInput {
                parent_id: Some(Some(kitchen.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let unchanged = app.services.categories.get_category(root.id).await.unwrap();
    assert_eq!(unchanged.parent_id, None);
}

#[tokio::test]
async fn reparenting_and_moving_to_root() {
    let app = common::TestApp::new().await;
    let a = app.create_category("a", None).await;
    let b = app.create_category("b", None).await;
    let leaf = app.create_category("leaf", Some(a.id)).await;

    let moved = app
        .services
        .categories
        .update_category(
            leaf.id,
            UpdateCategoryInput {
                parent_id: Some(Some(b.id)),
                name: Some("Leaf".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(b.id));
    assert_eq!(moved.name, "Leaf");

    let rooted = app
        .services
        .categories
        .update_category(
            leaf.id,
            UpdateCategoryInput {
                parent_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rooted.parent_id, None);
}

#[tokio::test]
async fn category_with_children_is_protected() {
    let app = common::TestApp::new().await;
    let parent = app.create_category("tools", None).await;
    let child = app.create_category("saws", Some(parent.id)).await;

    let err = app
        .services
        .categories
        .delete_category(parent.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ConstraintViolation(_));

    app.services.categories.delete_category(child.id).await.unwrap();
    app.services.categories.delete_category(parent.id).await.unwrap();
    assert_matches!(
        app.services.categories.get_category(parent.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn deleting_a_category_detaches_its_products() {
    let app = common::TestApp::new().await;
    let category = app.create_category("lighting", None).await;

    let mut input = CreateProductInput::new("PID-1", "Lamp", "lamp");
    input.category_id = Some(category.id);
    let product = app.services.products.create_product(input).await.unwrap();

    app.services
        .categories
        .delete_category(category.id)
        .await
        .unwrap();

    let stored = app.services.products.get_product(product.id).await.unwrap();
    assert_eq!(stored.category_id, None);
    assert!(stored.updated_at > product.updated_at);
    assert_eq!(stored.created_at, product.created_at);
}

#[rstest]
#[case("   ", "blank-name")]
#[case("Kitchen", "not a slug")]
#[case("Kitchen", "")]
#[tokio::test]
async fn malformed_category_is_a_validation_error(#[case] name: &str, #[case] slug: &str) {
    let app = common::TestApp::new().await;

    let err = app
        .services
        .categories
        .create_category(CreateCategoryInput {
            name: name.to_string(),
            slug: slug.to_string(),
            is_active: None,
            parent_id: None,
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn foreign_key_blocks_direct_delete_of_a_parent() {
    let app = common::TestApp::new().await;
    let parent = app.create_category("furniture", None).await;
    app.create_category("chairs", Some(parent.id)).await;

    let err: ServiceError = Category::delete_by_id(parent.id)
        .exec(&*app.db)
        .await
        .unwrap_err()
        .into();

    assert_matches!(err, ServiceError::ConstraintViolation(_));
}

#[tokio::test]
async fn direct_category_delete_sets_product_reference_to_null() {
    let app = common::TestApp::new().await;
    let category = app.create_category("toys", None).await;

    let mut input = CreateProductInput::new("PID-1", "Kite", "kite");
    input.category_id = Some(category.id);
    let product = app.services.products.create_product(input).await.unwrap();

    Category::delete_by_id(category.id)
        .exec(&*app.db)
        .await
        .unwrap();

    let stored = app.services.products.get_product(product.id).await.unwrap();
    assert_eq!(stored.category_id, None);
}

#[tokio::test]
async fn partial_active_model_update_keeps_untouched_columns() {
    let app = common::TestApp::new().await;
    let parent = app.create_category("books", None).await;
    let category = app.create_category("novels", Some(parent.id)).await;

    let renamed = category::ActiveModel {
        id: Set(category.id),
        name: Set("Fiction".into()),
        ..Default::default()
    }
    .update(&*app.db)
    .await
    .unwrap();

    assert_eq!(renamed.name, "Fiction");
    assert_eq!(renamed.slug, "novels");
    assert_eq!(renamed.parent_id, Some(parent.id));

    let err: ServiceError = category::ActiveModel {
        id: Set(category.id),
        slug: Set("bad slug".into()),
        ..Default::default()
    }
    .update(&*app.db)
    .await
    .unwrap_err()
    .into();
    assert_matches!(err, ServiceError::ValidationError(_));
}
