//! Entity factories: single place where raw input becomes a canonical
//! record, so every entity is built the same way.

pub mod escola_factory;
pub mod turma_factory;

pub use escola_factory::EscolaFactory;
pub use turma_factory::TurmaFactory;

/// Per-field validation failures, in field order. One message per field:
/// the first failing rule for a field wins, but every field is checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.error_for(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// All messages comma-joined, the shape `AppError::Validation` carries.
    pub fn joined_messages(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Trims a raw optional field; blank values collapse to `None`.
pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
