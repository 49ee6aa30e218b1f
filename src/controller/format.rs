//! Response builders shared by the controllers.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::Result;

/// Returns a JSON response.
///
/// # Errors
/// Currently this function doesn't return any error. It returns a `Result`
/// so handlers can end with it directly.
pub fn json<T: Serialize>(t: T) -> Result<Response> {
    Ok(Json(t).into_response())
}

/// Returns a JSON response with a custom status code.
///
/// # Errors
/// Currently this function doesn't return any error.
pub fn json_with_status<T: Serialize>(status: StatusCode, t: T) -> Result<Response> {
    Ok((status, Json(t)).into_response())
}

/// Returns an HTML response.
///
/// # Errors
/// Currently this function doesn't return any error.
pub fn html(content: &str) -> Result<Response> {
    Ok(Html(content.to_string()).into_response())
}

/// Returns an XML document whose root element is `root`.
///
/// # Errors
/// Returns an error when `t` cannot be expressed as XML.
pub fn xml<T: Serialize>(root: &str, t: &T) -> Result<Response> {
    let body = quick_xml::se::to_string_with_root(root, t)?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], body).into_response())
}
