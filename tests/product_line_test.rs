mod common;

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use std::collections::HashSet;
use storefront_catalog::{
    entities::{ProductImage, ProductLine},
    services::{
        CreateProductImageInput, CreateProductLineInput, UpdateProductImageInput,
        UpdateProductLineInput,
    },
    ServiceError,
};
use uuid::Uuid;

fn image_input(product_line_id: Uuid, order: i32) -> CreateProductImageInput {
    CreateProductImageInput {
        product_line_id,
        name: format!("image-{}", order),
        alternative_text: "Front view".into(),
        url: format!("images/{}/{}.jpg", product_line_id.simple(), order),
        order,
    }
}

#[tokio::test]
async fn generated_skus_are_distinct_uuids() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "backpack").await;

    let mut skus = HashSet::new();
    for order in 0..5 {
        let line = app.create_line(product.id, order).await;
        assert_ne!(line.sku, Uuid::nil());
        assert_eq!(line.sku.get_version_num(), 4);
        assert!(skus.insert(line.sku));
    }

    let any = *skus.iter().next().unwrap();
    let found = app.services.product_lines.get_line_by_sku(any).await.unwrap();
    assert_eq!(found.sku, any);
}

#[tokio::test]
async fn line_defaults_and_ordering() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "tent").await;

    let second = app.create_line(product.id, 2).await;
    let first = app.create_line(product.id, 1).await;

    assert_eq!(first.stock_qty, 0);
    assert!(first.is_active);
    assert_eq!(first.price, Decimal::new(1250, 2));

    let lines = app.services.product_lines.list_lines(product.id).await.unwrap();
    let ids: Vec<_> = lines.iter().map(|l| l.id).collect();
    assert_eq!(ids, [first.id, second.id]);
}

#[tokio::test]
async fn duplicate_sku_is_a_constraint_violation() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "stove").await;
    let line = app.create_line(product.id, 1).await;

    let err = app
        .services
        .product_lines
        .create_line(CreateProductLineInput {
            product_id: product.id,
            price: dec!(25),
            sku: Some(line.sku),
            stock_qty: Some(4),
            is_active: None,
            order: 2,
            weight: 1.0,
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ConstraintViolation(_));
}

#[tokio::test]
async fn negative_values_are_validation_errors() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "skis").await;
    let line = app.create_line(product.id, 1).await;

    let err = app
        .services
        .product_lines
        .update_line(
            line.id,
            UpdateProductLineInput {
                stock_qty: Some(-3),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services
        .product_lines
        .create_line(CreateProductLineInput {
            product_id: product.id,
            price: dec!(-1),
            sku: None,
            stock_qty: None,
            is_active: None,
            order: 2,
            weight: 1.0,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let stored = app.services.product_lines.get_line(line.id).await.unwrap();
    assert_eq!(stored.stock_qty, 0);
}

#[tokio::test]
async fn line_for_missing_product_is_not_found() {
    let app = common::TestApp::new().await;

    let err = app
        .services
        .product_lines
        .create_line(CreateProductLineInput {
            product_id: Uuid::new_v4(),
            price: dec!(10),
            sku: None,
            stock_qty: None,
            is_active: None,
            order: 1,
            weight: 0.25,
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn deleting_a_line_removes_its_images() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "bike").await;
    let line = app.create_line(product.id, 1).await;
    let other_line = app.create_line(product.id, 2).await;

    for order in 0..3 {
        app.services
            .product_images
            .create_image(image_input(line.id, order))
            .await
            .unwrap();
    }
    let kept = app
        .services
        .product_images
        .create_image(image_input(other_line.id, 0))
        .await
        .unwrap();

    let removed = app.services.product_lines.delete_line(line.id).await.unwrap();
    assert_eq!(removed, 3);

    assert!(app
        .services
        .product_images
        .list_images(line.id)
        .await
        .unwrap()
        .is_empty());
    assert_matches!(
        app.services.product_lines.get_line(line.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert!(app.services.product_images.get_image(kept.id).await.is_ok());
}

#[tokio::test]
async fn image_lifecycle() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "camera").await;
    let line = app.create_line(product.id, 1).await;

    let back = app
        .services
        .product_images
        .create_image(image_input(line.id, 2))
        .await
        .unwrap();
    let front = app
        .services
        .product_images
        .create_image(image_input(line.id, 1))
        .await
        .unwrap();

    let images = app.services.product_images.list_images(line.id).await.unwrap();
    let ids: Vec<_> = images.iter().map(|i| i.id).collect();
    assert_eq!(ids, [front.id, back.id]);

    let updated = app
        .services
        .product_images
        .update_image(
            back.id,
            UpdateProductImageInput {
                alternative_text: Some("Rear view".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.alternative_text, "Rear view");

    let err = app
        .services
        .product_images
        .update_image(
            back.id,
            UpdateProductImageInput {
                name: Some("n".repeat(101)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let stored = app.services.product_images.get_image(back.id).await.unwrap();
    assert_eq!(stored.name, "image-2");
    assert_eq!(stored.alternative_text, "Rear view");

    app.services.product_images.delete_image(front.id).await.unwrap();
    assert_matches!(
        app.services.product_images.delete_image(front.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn image_for_missing_line_is_not_found() {
    let app = common::TestApp::new().await;

    let err = app
        .services
        .product_images
        .create_image(image_input(Uuid::new_v4(), 0))
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn direct_line_delete_cascades_to_images() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "drone").await;
    let line = app.create_line(product.id, 1).await;

    let mut images = Vec::new();
    for order in 0..2 {
        images.push(
            app.services
                .product_images
                .create_image(image_input(line.id, order))
                .await
                .unwrap(),
        );
    }

    ProductLine::delete_by_id(line.id)
        .exec(&*app.db)
        .await
        .unwrap();

    for image in images {
        let stored = ProductImage::find_by_id(image.id)
            .one(&*app.db)
            .await
            .unwrap();
        assert!(stored.is_none());
    }
}

#[tokio::test]
async fn listing_images_of_missing_line_is_not_found() {
    let app = common::TestApp::new().await;

    assert_matches!(
        app.services.product_images.list_images(Uuid::new_v4()).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn blank_image_text_is_a_validation_error() {
    let app = common::TestApp::new().await;
    let product = app.create_product("PID-1", "lens").await;
    let line = app.create_line(product.id, 1).await;

    let mut input = image_input(line.id, 0);
    input.name = "  ".into();
    assert_matches!(
        app.services.product_images.create_image(input).await,
        Err(ServiceError::ValidationError(_))
    );

    let mut input = image_input(line.id, 1);
    input.alternative_text = String::new();
    assert_matches!(
        app.services.product_images.create_image(input).await,
        Err(ServiceError::ValidationError(_))
    );
}
