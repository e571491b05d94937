//! Admin mutation workflow against a real database.
//!
//! These tests require a `PostgreSQL` database at `TEST_DATABASE_URL`; every
//! test returns early when it is unset. They share the database, so each one
//! holds [`DB_LOCK`] for its whole run.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tokio::sync::Mutex;
use tower::ServiceExt;

use tehtehair_core::{ChangeEvent, ChangeKind, Table};
use tehtehair_integration_tests::{body_text, database_state, next_refresh, router};
use tehtehair_storefront::db::{ProductRepository, RepositoryError, SettingsRepository};
use tehtehair_storefront::realtime::{ChangeFilter, Signal, listener};
use tehtehair_storefront::services::admin::{ProductForm, SettingsForm};
use tehtehair_storefront::services::{AdminWorkflow, CatalogLoader, HomeCopy, SettingsLoader};

static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn form(name: &str, original: &str, discount: &str) -> ProductForm {
    ProductForm {
        name: name.to_owned(),
        description: String::new(),
        original_price: original.to_owned(),
        discount_price: discount.to_owned(),
        image_url: String::new(),
    }
}

fn messages(outcome: &tehtehair_storefront::services::MutationOutcome) -> Vec<&str> {
    outcome.toasts.iter().map(|t| t.message.as_str()).collect()
}

#[tokio::test]
async fn test_product_lifecycle() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let pool = state.pool();
    let workflow = AdminWorkflow::new(pool);

    let outcome = workflow.create_product(&form("Netflix Premium", "20", "15")).await;
    assert_eq!(messages(&outcome), ["Product added successfully"]);
    let products = outcome.refreshed.unwrap().products.unwrap();
    assert_eq!(products.len(), 1);
    let id = products[0].id.to_string();

    let mut catalog = CatalogLoader::new();
    assert!(catalog.reload(pool).await);
    assert_eq!(catalog.products()[0].price_summary(), "$15.00 / $20.00");
    assert_eq!(catalog.products()[0].discount_label.as_deref(), Some("-25%"));

    let outcome = workflow.toggle_visibility(&id).await;
    assert_eq!(messages(&outcome), ["Product hidden"]);
    assert!(catalog.reload(pool).await);
    assert!(catalog.is_empty());

    // Hidden products stay on the dashboard.
    assert!(outcome.refreshed.unwrap().products.unwrap()[0].is_hidden);

    let outcome = workflow.toggle_visibility(&id).await;
    assert_eq!(messages(&outcome), ["Product shown"]);

    let outcome = workflow
        .update_product(&id, &form("Netflix Premium 4K", "30", "24"))
        .await;
    assert_eq!(messages(&outcome), ["Product updated successfully"]);
    assert!(catalog.reload(pool).await);
    assert_eq!(catalog.products()[0].name, "Netflix Premium 4K");
    assert_eq!(catalog.products()[0].discount_label.as_deref(), Some("-20%"));

    let outcome = workflow.delete_product(&id).await;
    assert_eq!(messages(&outcome), ["Product deleted successfully"]);
    assert!(catalog.reload(pool).await);
    assert!(catalog.is_empty());
    assert!(ProductRepository::new(pool).list_all().await.unwrap().is_empty());

    // Gone for good: a second delete matches nothing.
    let outcome = workflow.delete_product(&id).await;
    assert_eq!(messages(&outcome), ["Failed to delete product"]);
    assert!(outcome.refreshed.is_none());
}

#[tokio::test]
async fn test_rejected_writes_change_nothing() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let pool = state.pool();
    let workflow = AdminWorkflow::new(pool);

    let outcome = workflow.create_product(&form("", "20", "15")).await;
    assert_eq!(messages(&outcome), ["Failed to add product"]);
    assert!(outcome.refreshed.is_none());

    let outcome = workflow.create_product(&form("Canva Pro", "twenty", "15")).await;
    assert_eq!(messages(&outcome), ["Failed to add product"]);

    let outcome = workflow
        .update_product(&uuid::Uuid::new_v4().to_string(), &form("Ghost", "1", "1"))
        .await;
    assert_eq!(messages(&outcome), ["Failed to update product"]);

    let outcome = workflow.toggle_visibility("not-a-uuid").await;
    assert_eq!(messages(&outcome), ["Failed to update visibility"]);

    assert!(ProductRepository::new(pool).list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_update_reaches_home_copy() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let pool = state.pool();
    let settings = SettingsRepository::new(pool).fetch_singleton().await.unwrap();

    let mut home: SettingsLoader<HomeCopy> = SettingsLoader::new();
    assert!(home.reload(pool).await);
    assert_eq!(home.view().store_name, "TehTehAir Store");

    let form = SettingsForm {
        id: settings.id.to_string(),
        store_name: "TehTeh Digital".to_owned(),
        store_description: settings.store_description.clone(),
        cta_text: "Shop Now".to_owned(),
        about_description: settings.about_description.clone(),
        payment_description: settings.payment_description.clone(),
    };
    let outcome = AdminWorkflow::new(pool).update_settings(&form).await;
    assert_eq!(messages(&outcome), ["Settings updated successfully"]);
    let refreshed = outcome.refreshed.unwrap().settings.unwrap();
    assert_eq!(refreshed.store_name, "TehTeh Digital");
    assert_eq!(refreshed.hero_image_url, settings.hero_image_url);

    assert!(home.reload(pool).await);
    assert_eq!(home.view().store_name, "TehTeh Digital");
    assert_eq!(home.view().cta_text, "Shop Now");

    let stale = SettingsForm {
        id: uuid::Uuid::new_v4().to_string(),
        ..form
    };
    let outcome = AdminWorkflow::new(pool).update_settings(&stale).await;
    assert_eq!(messages(&outcome), ["Failed to update settings"]);
}

#[tokio::test]
async fn test_second_settings_row_fails_reads() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let pool = state.pool();

    let mut home: SettingsLoader<HomeCopy> = SettingsLoader::new();
    assert!(home.reload(pool).await);
    let before = home.view().clone();

    sqlx::query("INSERT INTO store_settings (store_name) VALUES ('Duplicate')")
        .execute(pool)
        .await
        .unwrap();

    assert!(matches!(
        SettingsRepository::new(pool).fetch_singleton().await,
        Err(RepositoryError::NotSingleRow(2))
    ));
    assert!(!home.reload(pool).await);
    assert_eq!(home.view(), &before);
}

#[tokio::test]
async fn test_product_change_reaches_subscribers() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let pool = state.pool();
    let handle = listener::spawn(pool.clone(), state.changes().clone());
    let mut products = state.changes().subscribe(ChangeFilter::PRODUCTS);

    // Give the listener time to issue LISTEN before writing.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let outcome = AdminWorkflow::new(pool)
        .create_product(&form("Disney+", "10", "7"))
        .await;
    assert!(outcome.succeeded());

    let signal = tokio::time::timeout(Duration::from_secs(5), products.next())
        .await
        .unwrap()
        .unwrap();
    match signal {
        Signal::Changed(event) => {
            assert_eq!(event.table, Table::Products);
            assert_eq!(event.kind, ChangeKind::Insert);
        }
        Signal::Missed(_) => panic!("unexpected lag"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_dashboard_mutation_over_http() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let app = router(state);

    let response = app
        .clone()
        .oneshot(
            Request::post("/admin")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ttradmin&password=ttradmin69"))
                .unwrap(),
        )
        .await
        .unwrap();
    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned();

    let response = app
        .clone()
        .oneshot(
            Request::post("/admin/products")
                .header(header::COOKIE, &cookie)
                .header("HX-Request", "true")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "name=YouTube+Premium&description=&original_price=12&discount_price=9&image_url=",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["HX-Trigger"], "mutationSucceeded");
    let html = body_text(response).await;
    assert!(html.contains("Product added successfully"));
    assert!(html.contains("YouTube Premium"));
    // Sent from the products tab, so the settings form is not swapped.
    assert!(!html.contains("settings-form-body"));
}

#[tokio::test]
async fn test_store_stream_pushes_refreshed_catalog() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let app = router(state.clone());

    let response = app
        .oneshot(Request::get("/live/store").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let mut body = response.into_body().into_data_stream();

    let outcome = AdminWorkflow::new(state.pool())
        .create_product(&form("Netflix Premium", "20", "15"))
        .await;
    assert!(outcome.succeeded());
    state
        .changes()
        .publish(ChangeEvent::new(Table::Products, ChangeKind::Insert));

    let event = next_refresh(&mut body, Duration::from_secs(5)).await.unwrap();
    assert!(event.contains("Netflix Premium"));
    assert!(event.contains("-25%"));
    assert!(event.contains("$15.00 / $20.00"));
}

#[tokio::test]
async fn test_settings_stream_refreshes_on_update_only() {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = database_state().await else {
        return;
    };
    let app = router(state.clone());

    let response = app
        .oneshot(Request::get("/live/about").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let mut body = response.into_body().into_data_stream();

    state
        .changes()
        .publish(ChangeEvent::new(Table::StoreSettings, ChangeKind::Insert));
    assert!(next_refresh(&mut body, Duration::from_secs(1)).await.is_none());

    let settings = SettingsRepository::new(state.pool())
        .fetch_singleton()
        .await
        .unwrap();
    let form = SettingsForm {
        id: settings.id.to_string(),
        store_name: settings.store_name.clone(),
        store_description: settings.store_description.clone(),
        cta_text: settings.cta_text.clone(),
        about_description: "Fast delivery across Cambodia.".to_owned(),
        payment_description: settings.payment_description.clone(),
    };
    assert!(
        AdminWorkflow::new(state.pool())
            .update_settings(&form)
            .await
            .succeeded()
    );
    state
        .changes()
        .publish(ChangeEvent::new(Table::StoreSettings, ChangeKind::Update));

    let event = next_refresh(&mut body, Duration::from_secs(5)).await.unwrap();
    assert!(event.contains("Fast delivery across Cambodia."));
}
