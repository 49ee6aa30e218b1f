use std::fmt::{self, Display, Formatter};

/// Identity shared by every person known to the clinic.
///
/// The identifier stays `None` until the record has been persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Person {
    id: Option<i32>,
    first_name: String,
    last_name: String,
}

impl Person {
    /// Creates a new, not yet persisted, [`Person`].
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Attaches the storage identifier.
    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn assign_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    /// Returns the storage identifier, if the person has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Returns `true` while the person has no storage identifier.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
