use serde::Serialize;

use super::TeraView;
use crate::{clinic::Vet, Result};

/// Template key of the veterinarians table.
pub const LIST: &str = "vets/list.html";

#[derive(Serialize)]
struct ListPage<'a> {
    vets: &'a [Vet],
}

/// Renders the veterinarians table.
///
/// Vets are passed to the template in their serialized form, so the page
/// binds the same field names as the JSON listing.
///
/// # Errors
/// Returns an error when the template fails to render.
pub fn list(view: &TeraView, vets: &[Vet]) -> Result<String> {
    view.render(LIST, &ListPage { vets })
}
