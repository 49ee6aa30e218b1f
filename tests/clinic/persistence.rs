use vetclinic::{
    clinic::{ClinicServiceError, Person, Specialty, Vet, VetValidationError},
    tests_cfg,
};

fn names(specialties: &[Specialty]) -> Vec<String> {
    specialties.iter().map(|s| s.name().to_string()).collect()
}

#[tokio::test]
async fn vets_reload_with_sorted_specialties() {
    let ctx = tests_cfg::app::get_app_context().await;
    let mut vet = Vet::new(Person::new("Linda", "Douglas"))
        .with_license("VET-1003")
        .with_email("linda.douglas@petclinic.example");
    for name in ["radiology", "surgery", "dentistry"] {
        let specialty = ctx.clinic.ensure_specialty(name).await.expect("specialty");
        vet.add_specialty(specialty);
    }

    let stored = ctx.clinic.register_vet(vet).await.expect("register");
    let id = stored.id().expect("persisted id");

    let loaded = ctx
        .clinic
        .vet(id)
        .await
        .expect("load")
        .expect("vet exists");
    assert_eq!(
        names(&loaded.specialties()),
        vec!["dentistry", "radiology", "surgery"]
    );
    assert_eq!(loaded.nr_of_specialties(), 3);
    assert_eq!(loaded.professional_license_number(), "VET-1003");
    assert_eq!(loaded.email(), Some("linda.douglas@petclinic.example"));
    assert_eq!(loaded.first_name(), "Linda");
}

#[tokio::test]
async fn vets_without_specialties_reload_empty() {
    let ctx = tests_cfg::app::get_app_context().await;
    let vet = Vet::new(Person::new("James", "Carter")).with_license("VET-1001");
    let stored = ctx.clinic.register_vet(vet).await.expect("register");

    let loaded = ctx
        .clinic
        .vet(stored.id().expect("id"))
        .await
        .expect("load")
        .expect("vet exists");
    assert!(loaded.specialties().is_empty());
    assert_eq!(loaded.nr_of_specialties(), 0);
    assert_eq!(loaded.email(), None);
}

#[tokio::test]
async fn update_replaces_associations() {
    let ctx = tests_cfg::app::get_app_context().await;
    let radiology = ctx.clinic.ensure_specialty("radiology").await.expect("radiology");
    let surgery = ctx.clinic.ensure_specialty("surgery").await.expect("surgery");

    let mut vet = Vet::new(Person::new("Helen", "Leary")).with_license("VET-1002");
    vet.add_specialty(radiology);
    let stored = ctx.clinic.register_vet(vet).await.expect("register");
    let id = stored.id().expect("id");

    let mut changed = Vet::new(Person::new("Helen", "Leary").with_id(id)).with_license("VET-2002");
    changed.add_specialty(surgery);
    ctx.clinic.update_vet(changed).await.expect("update");

    let loaded = ctx.clinic.vet(id).await.expect("load").expect("vet exists");
    assert_eq!(names(&loaded.specialties()), vec!["surgery"]);
    assert_eq!(loaded.professional_license_number(), "VET-2002");
}

#[tokio::test]
async fn updating_unknown_vet_fails() {
    let ctx = tests_cfg::app::get_app_context().await;
    let ghost = Vet::new(Person::new("Ghost", "Vet").with_id(42)).with_license("VET-0042");
    let err = ctx.clinic.update_vet(ghost).await.expect_err("unknown vet");
    assert!(matches!(err, ClinicServiceError::VetNotFound { id: 42 }));
}

#[tokio::test]
async fn remove_deletes_vet_and_associations() {
    let ctx = tests_cfg::app::get_app_context().await;
    let surgery = ctx.clinic.ensure_specialty("surgery").await.expect("surgery");
    let mut vet = Vet::new(Person::new("Rafael", "Ortega")).with_license("VET-1004");
    vet.add_specialty(surgery);
    let id = ctx
        .clinic
        .register_vet(vet)
        .await
        .expect("register")
        .id()
        .expect("id");

    ctx.clinic.remove_vet(id).await.expect("remove");
    assert!(ctx.clinic.vet(id).await.expect("load").is_none());
    // the shared reference row survives
    assert_eq!(ctx.clinic.specialties().await.expect("specialties").len(), 1);

    let err = ctx.clinic.remove_vet(id).await.expect_err("already removed");
    assert!(matches!(err, ClinicServiceError::VetNotFound { .. }));
}

#[tokio::test]
async fn invalid_vets_never_reach_the_database() {
    let ctx = tests_cfg::app::get_app_context().await;
    let vet = Vet::new(Person::new("Sharon", "Jenkins"))
        .with_license("VET-1006")
        .with_email("not-an-email");

    let err = ctx.clinic.register_vet(vet).await.expect_err("malformed email");
    match err {
        ClinicServiceError::Invalid(errors) => {
            assert!(errors.contains(&VetValidationError::MalformedEmail {
                value: "not-an-email".to_string()
            }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ctx.clinic.vets().await.expect("list").is_empty());
}

#[tokio::test]
async fn persisted_vets_cannot_be_registered_twice() {
    let ctx = tests_cfg::app::get_app_context().await;
    let vet = Vet::new(Person::new("James", "Carter")).with_license("VET-1001");
    let stored = ctx.clinic.register_vet(vet).await.expect("register");

    let err = ctx
        .clinic
        .register_vet(stored)
        .await
        .expect_err("already persisted");
    assert!(matches!(err, ClinicServiceError::AlreadyPersisted { .. }));
}

#[tokio::test]
async fn specialties_list_ignores_case() {
    let ctx = tests_cfg::app::get_app_context().await;
    for name in ["Zoology", "anesthesia", "Dentistry"] {
        ctx.clinic.ensure_specialty(name).await.expect("specialty");
    }
    assert_eq!(
        names(&ctx.clinic.specialties().await.expect("specialties")),
        vec!["anesthesia", "Dentistry", "Zoology"]
    );
}
