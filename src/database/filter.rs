use std::fmt::{Display, Formatter};

use crate::middleware::error::{AppError, AppResult};

/// Flat equality filter: every condition is `field = value`, all of them ANDed.
///
/// Conditions keep insertion order. Adding a field that is already present replaces
/// its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.conditions.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field, value)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conditions.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Builds the WHERE condition and its bindings. Field names are spliced into
    /// the query so they must be plain identifiers; values are always bound.
    pub(crate) fn to_where(&self) -> AppResult<WhereClause> {
        if self.is_empty() {
            return Ok(WhereClause {
                condition: "true".to_string(),
                bindings: vec![],
            });
        }

        let mut parts = Vec::with_capacity(self.conditions.len());
        let mut bindings = Vec::with_capacity(self.conditions.len());
        for (i, (field, value)) in self.conditions.iter().enumerate() {
            validate_field_name(field)?;
            let param = format!("_f{i}");
            parts.push(format!("{field}=${param}"));
            bindings.push((param, value.clone()));
        }

        Ok(WhereClause {
            condition: parts.join(" AND "),
            bindings,
        })
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let conditions = self
            .conditions
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{conditions}}}")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct WhereClause {
    pub condition: String,
    pub bindings: Vec<(String, String)>,
}

pub(crate) fn validate_field_name(field: &str) -> AppResult<()> {
    let mut chars = field.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    match valid {
        true => Ok(()),
        false => Err(AppError::InvalidField {
            field: field.to_string(),
        }),
    }
}
