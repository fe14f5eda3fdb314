//! Logging metadata carried alongside internal failures.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Explicit logging metadata attached to an internal error.
///
/// Built at the point where a failure is reclassified and consumed once,
/// when the transport boundary logs the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl LogContext {
    /// Creates a context tagged with the originating service.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_product_id(mut self, id: impl Into<String>) -> Self {
        self.product_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Fills fields missing from `self` with those present in `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            service: self.service.or(other.service),
            product_id: self.product_id.or(other.product_id),
            product_name: self.product_name.or(other.product_name),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.service.is_none() && self.product_id.is_none() && self.product_name.is_none()
    }
}

impl Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("service", &self.service),
            ("product_id", &self.product_id),
            ("product_name", &self.product_name),
        ];

        let mut first = true;
        for (key, value) in fields {
            if let Some(value) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{key}={value}")?;
                first = false;
            }
        }
        Ok(())
    }
}
