use axum::http::StatusCode;
use serde_json::{json, Value};
use vetclinic::tests_cfg;

#[tokio::test]
async fn html_listing_shows_every_vet() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server.get("/vets").await;
    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("James Carter"));
    assert!(page.contains("dentistry surgery"));
    assert!(page.contains(">none<"));
    assert!(page.contains("VET-1004"));
    // Carter is listed before Leary
    let carter = page.find("James Carter").expect("Carter row");
    let leary = page.find("Helen Leary").expect("Leary row");
    assert!(carter < leary);
}

#[tokio::test]
async fn json_listing_wraps_vets() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server.get("/vets.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let vets = body["vetList"].as_array().expect("vetList array");
    assert_eq!(vets.len(), 6);

    let douglas = vets
        .iter()
        .find(|vet| vet["lastName"] == "Douglas")
        .expect("Douglas listed");
    assert_eq!(douglas["nrOfSpecialties"], 2);
    assert_eq!(douglas["professionalLicenseNumber"], "VET-1003");
    let names: Vec<&str> = douglas["specialties"]
        .as_array()
        .expect("specialties array")
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["dentistry", "surgery"]);
}

#[tokio::test]
async fn show_returns_one_vet_or_not_found() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);
    let carter = ctx
        .clinic
        .vets()
        .await
        .expect("vets")
        .into_iter()
        .find(|vet| vet.last_name() == "Carter")
        .expect("Carter is seeded");
    let id = carter.id().expect("id");

    let response = server.get(&format!("/vets/{id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "id": id,
            "firstName": "James",
            "lastName": "Carter",
            "professionalLicenseNumber": "VET-1001",
            "email": carter.email(),
            "specialties": [],
            "nrOfSpecialties": 0
        })
    );

    let missing = server.get("/vets/9999").await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_vet_with_known_specialties() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server
        .post("/vets")
        .json(&json!({
            "firstName": "Maria",
            "lastName": "Escobito",
            "professionalLicenseNumber": "VET-2001",
            "email": "maria.escobito@petclinic.example",
            "specialties": ["surgery", "radiology"]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].is_number());
    assert_eq!(body["nrOfSpecialties"], 2);
    assert_eq!(body["specialties"][0]["name"], "radiology");

    assert_eq!(ctx.clinic.vets().await.expect("vets").len(), 7);
}

#[tokio::test]
async fn invalid_vets_are_rejected_without_writes() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server
        .post("/vets")
        .json(&json!({
            "firstName": "Maria",
            "lastName": "Escobito",
            "email": "maria-at-clinic"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");
    assert!(body["errors"]["professionalLicenseNumber"].is_array());
    assert!(body["errors"]["email"].is_array());

    assert_eq!(ctx.clinic.vets().await.expect("vets").len(), 6);
}

#[tokio::test]
async fn unknown_specialties_are_bad_requests() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server
        .post("/vets")
        .json(&json!({
            "firstName": "Maria",
            "lastName": "Escobito",
            "professionalLicenseNumber": "VET-2001",
            "specialties": ["oncology"]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.clinic.vets().await.expect("vets").len(), 6);
}

#[tokio::test]
async fn xml_listing_uses_the_same_field_names() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server.get("/vets.xml").await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert_eq!(content_type.to_str().expect("ascii header"), "application/xml");

    let document = response.text();
    assert!(document.starts_with("<vets>"));
    assert_eq!(document.matches("<vetList>").count(), 6);
    assert!(document
        .contains("<professionalLicenseNumber>VET-1003</professionalLicenseNumber>"));
    assert!(document.contains("<email>linda.douglas@petclinic.example</email>"));
    assert!(document.contains("<specialties><id>"));
    assert!(document.contains("<name>dentistry</name>"));
}

#[tokio::test]
async fn overlong_names_are_rejected_before_storage() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server
        .post("/vets")
        .json(&json!({
            "firstName": "M".repeat(31),
            "lastName": "Escobito",
            "professionalLicenseNumber": "VET-2001"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["errors"]["firstName"].is_array());
    assert_eq!(ctx.clinic.vets().await.expect("vets").len(), 6);
}

#[tokio::test]
async fn malformed_bodies_answer_with_error_details() {
    let ctx = tests_cfg::app::seeded_app_context().await;
    let server = tests_cfg::app::test_server(&ctx);

    let response = server
        .post("/vets")
        .json(&json!({ "lastName": "Escobito" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_request");
    assert!(body["description"]
        .as_str()
        .is_some_and(|text| text.contains("firstName")));
}
