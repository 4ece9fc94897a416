//! Locating and opening layout documents.
//!
//! A keyboards root is either a directory on disk or a location inside the
//! resources bundled with this crate, written with the `resource://` scheme.
//! The bundled root holds the layouts shipped in `data/keyboards/`.

use std::{
    borrow::Cow,
    fmt,
    io::{self, Cursor, Read},
    path::PathBuf,
};

use rust_embed::Embed;

use keyloom_parser::error::Result as ParseResult;

use crate::KeyloomError;

/// Scheme prefix marking a bundled resource.
pub const RESOURCE_SCHEME: &str = "resource://";

/// Root of the keyboards bundled with this crate.
pub const BUNDLED_KEYBOARDS_DIR: &str = "resource:///keyloom/keyboards/";

const BUNDLED_PREFIX: &str = "/keyloom/keyboards/";

#[derive(Embed)]
#[folder = "data/keyboards/"]
struct BundledKeyboards;

/// A document location: a file system path or a bundled resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceName {
    Path(PathBuf),
    Bundled(String),
}

impl ResourceName {
    /// Interprets `name` as a bundled resource when it carries the
    /// `resource://` scheme, and as a file system path otherwise.
    pub fn parse(name: &str) -> Self {
        match name.strip_prefix(RESOURCE_SCHEME) {
            Some(path) => Self::Bundled(path.to_string()),
            None => Self::Path(PathBuf::from(name)),
        }
    }

    /// Returns the location of `relative` below this one.
    pub fn join(&self, relative: &str) -> Self {
        match self {
            Self::Path(path) => Self::Path(path.join(relative)),
            Self::Bundled(path) if path.ends_with('/') => Self::Bundled(format!("{path}{relative}")),
            Self::Bundled(path) => Self::Bundled(format!("{path}/{relative}")),
        }
    }

    /// Returns the catalog document below this root.
    pub fn catalog(&self) -> Self {
        self.join("keyboards.xml")
    }

    /// Returns the geometry document called `name` below this root.
    pub fn geometry(&self, name: &str) -> Self {
        self.join(&format!("geometry/{name}.xml"))
    }

    /// Returns the symbols document called `name` below this root.
    pub fn symbols(&self, name: &str) -> Self {
        self.join(&format!("symbols/{name}.xml"))
    }

    /// Opens the document for reading.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error for paths, and
    /// [`io::ErrorKind::NotFound`] for bundled names with no resource.
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        match self {
            Self::Path(path) => Ok(Box::new(std::fs::File::open(path)?)),
            Self::Bundled(path) => {
                let data = bundled(path).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "no such bundled resource")
                })?;
                Ok(Box::new(Cursor::new(data)))
            }
        }
    }

    /// Opens the document and hands it to `parse`, attaching this name to
    /// any failure.
    pub(crate) fn read_with<T>(
        &self,
        parse: impl FnOnce(Box<dyn Read>) -> ParseResult<T>,
    ) -> Result<T, KeyloomError> {
        let reader = self.open().map_err(|source| KeyloomError::Io {
            resource: self.to_string(),
            source,
        })?;
        parse(reader).map_err(|err| KeyloomError::new_parse_error(err, self.to_string()))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bundled(path) => write!(f, "{RESOURCE_SCHEME}{path}"),
        }
    }
}

fn bundled(path: &str) -> Option<Cow<'static, [u8]>> {
    let relative = path.strip_prefix(BUNDLED_PREFIX)?;
    BundledKeyboards::get(relative).map(|file| file.data)
}
