use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;

/// Result of every fallible icemeta operation.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong, coarse enough for callers to branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Anything that doesn't fit the kinds below, for example a table
    /// identifier without a name.
    Unexpected,

    /// Profile configuration is invalid.
    ///
    /// This error is returned when the config file can't be read, the
    /// selected profile doesn't exist, or a required key is missing.
    ConfigInvalid,
    /// Catalog type is not supported.
    ///
    /// Only `GLUE` and `UC` are accepted as `CATALOG_TYPE`.
    CatalogTypeUnsupported,
    /// Catalog service returned an error or couldn't be reached.
    CatalogUnavailable,
}

impl ErrorKind {
    /// Name of the kind as printed in error messages.
    pub fn into_static(self) -> &'static str {
        self.into()
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

impl From<ErrorKind> for &'static str {
    fn from(v: ErrorKind) -> &'static str {
        match v {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::CatalogTypeUnsupported => "CatalogTypeUnsupported",
            ErrorKind::CatalogUnavailable => "CatalogUnavailable",
        }
    }
}

/// Error returned while loading profiles, building catalogs or walking them.
///
/// Carries a kind, a message, `key: value` context such as the profile or
/// table involved, and optionally the underlying error.
pub struct Error {
    kind: ErrorKind,
    message: String,

    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            let context = self
                .context
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .join(", ");
            write!(f, ", context: {{ {context} }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }

        Ok(())
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // `{:#?}` prints the raw struct.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("source", &self.source);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "    {k}: {v}")?;
            }
        }
        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "Source: {source:?}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    /// Creates an error of `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),

            context: Vec::default(),
            source: None,
        }
    }

    /// Attach `key: value` context, printed in insertion order.
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the underlying error.
    ///
    /// Debug builds panic when a source is already set.
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "the source error has been set");

        self.source = Some(src.into());
        self
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message without context or source.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<iceberg::Error> for Error {
    fn from(v: iceberg::Error) -> Self {
        Self::new(ErrorKind::CatalogUnavailable, "catalog request failed").set_source(v)
    }
}

impl From<ini::Error> for Error {
    fn from(v: ini::Error) -> Self {
        Self::new(ErrorKind::ConfigInvalid, "reading config file failed").set_source(v)
    }
}
