// tests/request_building.rs

mod common;

use axum::http::{header, Method};
use common::{shop, shop_kernel, ExistingOrderId, RecordingKernel, EXISTING_ORDER_ID};
use http_body_util::BodyExt;
use httpsmoke::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn test_post_request_carries_body_and_content_type() {
    let table = shop();
    let kernel = shop_kernel(&table);
    let config = ConfigBuilder::new()
        .base_uri("https://shop.test")
        .post_content_type("application/x-www-form-urlencoded")
        .build()
        .unwrap();
    let mut suite = HttpSmokeTest::new(&table, &kernel, config);
    suite.set_post_data_for_route("cart_add", "product=1&quantity=2");

    let data_sets = suite.data_provider().unwrap();
    let request = suite.create_request(&data_sets["cart_add"]).unwrap();
    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.uri(), "https://shop.test/cart/add");
    assert_eq!(
        request.headers()[header::CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    let body = request.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"product=1&quantity=2");

    // Routes without a body stay GET and get no content type.
    let request = suite.create_request(&data_sets["homepage"]).unwrap();
    assert_eq!(request.method(), Method::GET);
    assert!(request.headers().get(header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn test_post_without_matching_content_type_fails_the_route() {
    let table = shop();
    let kernel = shop_kernel(&table);
    let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
    suite
        .set_post_data_for_route("cart_add", "product=1")
        .set_expected_code_for_route("cart_add", 201);

    let report = suite.run().await.unwrap();
    match report.outcome("cart_add") {
        Some(TestOutcome::Failed { actual, .. }) => assert_eq!(*actual, 415),
        other => panic!("Expected cart_add to fail, got {:?}", other),
    }
}

#[tokio::test]
async fn test_basic_auth_on_extra_only() {
    let table = shop();
    let kernel = shop_kernel(&table);
    let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
    suite.customize_route_configs(|customizer| {
        customizer.customize_by_route_name("admin", |config: &mut RouteConfig, _: &RouteInfo| {
            config.default_data_set().set_expected_status_code(401);
            config.add_extra("as admin", |extra| {
                extra.set_auth(Arc::new(BasicHttpAuth::new("admin", "admin123")));
                extra.set_expected_status_code(200);
            });
            config.add_extra("wrong password", |extra| {
                extra.set_auth(Arc::new(BasicHttpAuth::new("admin", "hunter2")));
                extra.set_expected_status_code(403);
            });
        })
    });

    let data_sets = suite.data_provider().unwrap();
    let request = suite.create_request(&data_sets["admin [as admin]"]).unwrap();
    assert_eq!(
        request.headers()[header::AUTHORIZATION],
        "Basic YWRtaW46YWRtaW4xMjM="
    );
    let request = suite.create_request(&data_sets["admin"]).unwrap();
    assert!(request.headers().get(header::AUTHORIZATION).is_none());

    let report = suite.run().await.unwrap();
    for name in ["admin", "admin [as admin]", "admin [wrong password]"] {
        assert_eq!(report.outcome(name), Some(&TestOutcome::Passed), "{}", name);
    }
}

#[tokio::test]
async fn test_deferred_setup_reads_the_container() {
    let table = shop();
    let kernel = RecordingKernel::new(shop_kernel(&table));
    let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
    suite.customize_route_configs(|customizer| {
        customizer.customize_by_route_name(
            "order_detail",
            |config: &mut RouteConfig, _: &RouteInfo| {
                config
                    .default_data_set()
                    .add_deferred_setup(deferred(|data_set, container| {
                        let order = container
                            .get::<ExistingOrderId>()
                            .ok_or_else(|| anyhow::anyhow!("order fixture missing"))?;
                        data_set.set_parameter("id", &order.0.to_string());
                        data_set.add_debug_note("Order id taken from the fixture container.");
                        Ok(())
                    }));
            },
        )
    });

    // The provider itself never runs setups.
    let data_sets = suite.data_provider().unwrap();
    assert_eq!(data_sets["order_detail"].parameter("id"), Some("1"));
    assert_eq!(data_sets["order_detail"].pending_deferred_setups(), 1);

    let outcome = suite
        .test_http_response(data_sets["order_detail"].clone())
        .await
        .unwrap();
    assert_eq!(outcome, TestOutcome::Passed);
    assert_eq!(
        kernel.seen(),
        vec![format!("GET http://localhost/order/{}", EXISTING_ORDER_ID)]
    );
}

#[tokio::test]
async fn test_deferred_setup_may_skip() {
    let table = shop();
    let kernel = RecordingKernel::new(shop_kernel(&table));
    let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
    suite.customize_route_configs(|customizer| {
        customizer.customize_by_route_name("admin", |config: &mut RouteConfig, _: &RouteInfo| {
            config
                .default_data_set()
                .add_deferred_setup(deferred(|data_set, container| {
                    if container.get::<BasicHttpAuth>().is_none() {
                        data_set.add_debug_note("No admin credentials configured.");
                        data_set.skip();
                    }
                    Ok(())
                }));
        })
    });

    let data_sets = suite.data_provider().unwrap();
    let outcome = suite
        .test_http_response(data_sets["admin"].clone())
        .await
        .unwrap();
    assert!(outcome.is_skipped());
    assert!(outcome
        .message()
        .is_some_and(|m| m.ends_with("\n  - No admin credentials configured.")));
    assert_eq!(kernel.calls(), 0);
}

#[tokio::test]
async fn test_failing_deferred_setup_aborts_the_run() {
    let table = shop();
    let kernel = RecordingKernel::new(shop_kernel(&table));
    let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
    suite.customize_route_configs(|customizer| {
        customizer.customize_by_route_name("homepage", |config: &mut RouteConfig, _: &RouteInfo| {
            config
                .default_data_set()
                .add_deferred_setup(deferred(|_, _| Err(anyhow::anyhow!("database is down"))));
        })
    });

    match suite.run().await {
        Err(Error::DeferredSetup { name, source }) => {
            assert_eq!(name, "homepage");
            assert_eq!(source.to_string(), "database is down");
        }
        other => panic!("Expected Error::DeferredSetup, got {:?}", other),
    }
    assert_eq!(kernel.calls(), 0);
}
