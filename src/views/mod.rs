//! Server side rendered pages.
//!
//! Templates are compiled once into a [`TeraView`] when the application boots
//! and shared through the application context.
use serde::Serialize;
use tera::{Context, Tera};

use crate::Result;

pub mod vets;

const TEMPLATES: &[(&str, &str)] = &[(
    vets::LIST,
    include_str!("../../assets/views/vets/list.html"),
)];

/// Compiled page templates. Names ending in `.html` are autoescaped.
#[derive(Clone, Debug)]
pub struct TeraView {
    tera: Tera,
}

impl TeraView {
    /// Compiles every bundled template.
    ///
    /// # Errors
    /// Returns an error when a template does not parse.
    pub fn build() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Renders the template registered as `key` with `data` as its context.
    ///
    /// # Errors
    /// Returns an error when `key` is unknown or rendering fails.
    pub fn render<S: Serialize>(&self, key: &str, data: &S) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(key, &context)?)
    }
}
