use serde_json::{json, Value};
use vetclinic::tests_cfg;

#[tokio::test]
async fn ping_answers_ok() {
    let ctx = tests_cfg::app::get_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server.get("/_ping").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"ok": true}));
}

#[tokio::test]
async fn readiness_checks_the_database() {
    let ctx = tests_cfg::app::get_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    for path in ["/_health", "/_readiness"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"ok": true}), "{path}");
    }
}
