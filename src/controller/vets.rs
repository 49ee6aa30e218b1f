//! Veterinarian listing, lookup and registration.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::{format, Json, Routes};
use crate::{
    app::AppContext,
    clinic::{Person, Vet},
    views, Error, Result,
};

/// Wrapper serialized by the listings: `{"vetList": [...]}` as JSON, a
/// `<vets>` root with one `<vetList>` element per vet as XML.
#[derive(Debug, Serialize)]
pub struct Vets {
    #[serde(rename = "vetList")]
    pub vet_list: Vec<Vet>,
}

/// Body accepted when registering a veterinarian.
///
/// Specialties are given by name and must already exist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetParams {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub professional_license_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl VetParams {
    fn into_vet(self) -> Vet {
        let mut vet = Vet::new(Person::new(self.first_name, self.last_name));
        if let Some(license) = self.professional_license_number {
            vet.set_professional_license_number(license);
        }
        if let Some(email) = self.email {
            vet.set_email(email);
        }
        vet
    }
}

/// Renders the veterinarians table.
///
/// # Errors
/// Returns an error when the vets cannot be loaded or the page cannot be rendered.
pub async fn list(State(ctx): State<AppContext>) -> Result<Response> {
    let vets = ctx.clinic.vets().await?;
    format::html(&views::vets::list(&ctx.views, &vets)?)
}

/// # Errors
/// Returns an error when the vets cannot be loaded.
pub async fn list_json(State(ctx): State<AppContext>) -> Result<Response> {
    let vet_list = ctx.clinic.vets().await?;
    format::json(Vets { vet_list })
}

/// # Errors
/// Returns an error when the vets cannot be loaded or serialized.
pub async fn list_xml(State(ctx): State<AppContext>) -> Result<Response> {
    let vet_list = ctx.clinic.vets().await?;
    format::xml("vets", &Vets { vet_list })
}

/// # Errors
/// Returns [`Error::NotFound`] for unknown identifiers.
pub async fn show(Path(id): Path<i32>, State(ctx): State<AppContext>) -> Result<Response> {
    let vet = ctx.clinic.vet(id).await?.ok_or(Error::NotFound)?;
    format::json(vet)
}

/// Registers a new veterinarian.
///
/// # Errors
/// Answers 400 for unknown specialties, 422 when the vet does not validate,
/// and the extractor's status for a body that is not a vet.
pub async fn add(
    State(ctx): State<AppContext>,
    payload: std::result::Result<Json<VetParams>, JsonRejection>,
) -> Result<Response> {
    let Json(params) = payload?;
    let specialties = ctx.clinic.resolve_specialties(&params.specialties).await?;
    let mut vet = params.into_vet();
    for specialty in specialties {
        vet.add_specialty(specialty);
    }
    let stored = ctx.clinic.register_vet(vet).await?;
    format::json_with_status(StatusCode::CREATED, stored)
}

pub fn routes() -> Routes {
    Routes::new()
        .prefix("/vets")
        .add("/", get(list).post(add))
        .add(".json", get(list_json))
        .add(".xml", get(list_xml))
        .add("/{id}", get(show))
}
