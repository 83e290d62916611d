//! Positional command parameters for stored routine calls.

use super::ProviderDomainError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU16;

/// Placeholder syntax a backend uses for positional parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStyle {
    /// `$1`, `$2`, ... (PostgreSQL).
    Dollar,
    /// `@P1`, `@P2`, ... (SQL Server).
    AtP,
}

impl ParameterStyle {
    /// Renders the placeholder for a 1-based position.
    #[must_use]
    pub fn placeholder(self, position: NonZeroU16) -> String {
        match self {
            Self::Dollar => format!("${position}"),
            Self::AtP => format!("@P{position}"),
        }
    }

    /// Creates a parameter at `position` in this style.
    #[must_use]
    pub fn parameter(
        self,
        position: NonZeroU16,
        name: impl Into<String>,
        value: ParameterValue,
    ) -> CommandParameter {
        CommandParameter {
            name: name.into(),
            placeholder: self.placeholder(position),
            position,
            value,
        }
    }

    /// Numbers named values from 1 in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::TooManyParameters`] when more than
    /// `u16::MAX` values are supplied.
    pub fn bind_all<I, S>(self, values: I) -> Result<Vec<CommandParameter>, ProviderDomainError>
    where
        I: IntoIterator<Item = (S, ParameterValue)>,
        S: Into<String>,
    {
        let mut remaining = values.into_iter();
        let mut parameters = Vec::with_capacity(remaining.size_hint().0);
        while let Some((name, value)) = remaining.next() {
            let Some(position) = u16::try_from(parameters.len() + 1)
                .ok()
                .and_then(NonZeroU16::new)
            else {
                return Err(ProviderDomainError::TooManyParameters {
                    count: parameters.len() + 1 + remaining.count(),
                    limit: u16::MAX,
                });
            };
            parameters.push(self.parameter(position, name, value));
        }
        Ok(parameters)
    }
}

/// Value bound to a command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// SQL `NULL`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Character data.
    Text(String),
    /// Binary data.
    Binary(Vec<u8>),
}

/// Named positional parameter with its rendered placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParameter {
    name: String,
    position: NonZeroU16,
    placeholder: String,
    value: ParameterValue,
}

impl CommandParameter {
    /// Returns the logical parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the 1-based position.
    #[must_use]
    pub const fn position(&self) -> NonZeroU16 {
        self.position
    }

    /// Returns the placeholder to embed in command text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Returns the bound value.
    #[must_use]
    pub const fn value(&self) -> &ParameterValue {
        &self.value
    }
}
