use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::ser::{Serialize, Serializer};
use thiserror::Error;
use validator::Validate;

use super::value_objects::Person;

/// Maximum number of characters stored for a professional license number.
pub const LICENSE_NUMBER_MAX_LEN: u64 = 50;
/// Maximum number of characters stored for a first or last name.
pub const NAME_MAX_LEN: u64 = 30;

/// A named category of veterinary practice.
///
/// Specialties live in a shared reference table, so their identity is the
/// storage identifier: two values carrying the same id are the same specialty.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Specialty {
    id: i32,
    name: String,
}

impl Specialty {
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Specialty {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Specialty {}

impl Hash for Specialty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Specialty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Orders specialties ascending by name, ignoring case.
///
/// Names differing only in case compare equal, so a stable sort keeps them in
/// insertion order.
#[must_use]
pub fn by_name(left: &Specialty, right: &Specialty) -> Ordering {
    left.name.to_lowercase().cmp(&right.name.to_lowercase())
}

/// A veterinarian working at the clinic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vet {
    person: Person,
    professional_license_number: String,
    email: Option<String>,
    // insertion ordered, unique by specialty identity
    specialties: Vec<Specialty>,
}

impl Vet {
    /// Creates a new veterinarian with no license, email or specialties.
    #[must_use]
    pub fn new(person: Person) -> Self {
        Self {
            person,
            professional_license_number: String::new(),
            email: None,
            specialties: Vec::new(),
        }
    }

    /// Sets the professional license number.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.set_professional_license_number(license);
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.set_email(email);
        self
    }

    /// Returns the identity of the veterinarian.
    #[must_use]
    pub fn person(&self) -> &Person {
        &self.person
    }

    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.person.id()
    }

    pub(crate) fn assign_id(&mut self, id: i32) {
        self.person.assign_id(id);
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        self.person.first_name()
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        self.person.last_name()
    }

    #[must_use]
    pub fn professional_license_number(&self) -> &str {
        &self.professional_license_number
    }

    /// Replaces the license number. No validation happens here, see [`Vet::validate`].
    pub fn set_professional_license_number(&mut self, license: impl Into<String>) {
        self.professional_license_number = license.into();
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Replaces the contact email. An empty string clears it.
    ///
    /// No validation happens here, see [`Vet::validate`].
    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.email = if email.is_empty() { None } else { Some(email) };
    }

    /// Associates a specialty with the veterinarian.
    ///
    /// Returns `false` and leaves the association untouched when the
    /// specialty is already present.
    pub fn add_specialty(&mut self, specialty: Specialty) -> bool {
        if self.specialties.contains(&specialty) {
            return false;
        }
        self.specialties.push(specialty);
        true
    }

    /// Returns the associated specialties sorted by name.
    ///
    /// The returned vector is a copy, changing it has no effect on the vet.
    #[must_use]
    pub fn specialties(&self) -> Vec<Specialty> {
        let mut sorted = self.specialties.clone();
        sorted.sort_by(by_name);
        sorted
    }

    #[must_use]
    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    /// Identifiers of the associated specialties, in insertion order.
    pub(crate) fn specialty_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.specialties.iter().map(Specialty::id)
    }

    /// Checks the rules a veterinarian must satisfy before it is persisted.
    ///
    /// # Errors
    /// Returns every failing rule: a missing or overlong name or license
    /// number and a malformed email address.
    pub fn validate(&self) -> Result<(), VetValidationErrors> {
        let validator = VetValidator {
            first_name: self.first_name().to_string(),
            last_name: self.last_name().to_string(),
            professional_license_number: self.professional_license_number.clone(),
            email: self.email.clone(),
        };
        let Err(report) = validator.validate() else {
            return Ok(());
        };

        let bounded = [
            ("first_name", "firstName", self.first_name(), NAME_MAX_LEN),
            ("last_name", "lastName", self.last_name(), NAME_MAX_LEN),
            (
                "professional_license_number",
                "professionalLicenseNumber",
                self.professional_license_number.as_str(),
                LICENSE_NUMBER_MAX_LEN,
            ),
        ];
        let mut errors = Vec::new();
        for (key, field, value, max) in bounded {
            if !report.errors().contains_key(key) {
                continue;
            }
            errors.push(if value.is_empty() {
                VetValidationError::MissingRequiredField { field }
            } else {
                VetValidationError::FieldTooLong { field, max }
            });
        }
        if report.errors().contains_key("email") {
            errors.push(VetValidationError::MalformedEmail {
                value: self.email.clone().unwrap_or_default(),
            });
        }
        Err(VetValidationErrors(errors))
    }
}

#[derive(Validate)]
struct VetValidator {
    #[validate(length(min = 1, max = 30))]
    first_name: String,
    #[validate(length(min = 1, max = 30))]
    last_name: String,
    #[validate(length(min = 1, max = 50))]
    professional_license_number: String,
    #[validate(email)]
    email: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct VetView<'a> {
    id: Option<i32>,
    first_name: &'a str,
    last_name: &'a str,
    professional_license_number: &'a str,
    email: Option<&'a str>,
    specialties: Vec<Specialty>,
    nr_of_specialties: usize,
}

impl Serialize for Vet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VetView {
            id: self.id(),
            first_name: self.first_name(),
            last_name: self.last_name(),
            professional_license_number: &self.professional_license_number,
            email: self.email(),
            specialties: self.specialties(),
            nr_of_specialties: self.nr_of_specialties(),
        }
        .serialize(serializer)
    }
}

/// A single rule violated by a [`Vet`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VetValidationError {
    /// A required field was empty.
    #[error("{field} is required")]
    MissingRequiredField { field: &'static str },
    /// A field exceeded its storage length.
    #[error("{field} must be at most {max} characters long")]
    FieldTooLong { field: &'static str, max: u64 },
    /// The email was present but not a valid address.
    #[error("`{value}` is not a well-formed email address")]
    MalformedEmail { value: String },
}

impl VetValidationError {
    /// Serialized name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field } | Self::FieldTooLong { field, .. } => *field,
            Self::MalformedEmail { .. } => "email",
        }
    }
}

/// Every rule violated by a [`Vet`], in field order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VetValidationErrors(Vec<VetValidationError>);

impl VetValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[VetValidationError] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, error: &VetValidationError) -> bool {
        self.0.contains(error)
    }
}

impl Display for VetValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "invalid vet: {}", messages.join("; "))
    }
}

impl std::error::Error for VetValidationErrors {}
