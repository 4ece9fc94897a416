//! Keyloom - loads on-screen keyboard layouts.
//!
//! A layout is described by three kinds of document below a keyboards root:
//! a catalog (`keyboards.xml`) listing the selectable keyboards, one
//! geometry document per physical arrangement (`geometry/<name>.xml`) and
//! symbols documents (`symbols/<name>.xml`) binding what each key produces.
//! Symbols documents may include each other.
//!
//! [`KeyboardLoader`] resolves a keyboard id through the catalog, reads its
//! geometry, applies its symbols with their includes and returns a linked
//! [`keyboard::KeyboardModel`].

pub mod config;
pub mod resource;

mod assemble;
mod catalog;
mod error;
mod includes;

pub use keyloom_core::{descriptor, geometry, key, keyboard, outline, section, symbol};

pub use catalog::Catalog;
pub use error::KeyloomError;

use std::collections::HashSet;

use log::{debug, info, trace};

use keyloom_parser::parse_geometry;

use config::LoaderConfig;
use descriptor::KeyboardDescriptor;
use keyboard::KeyboardModel;
use resource::ResourceName;

/// Loader for keyboard layouts.
///
/// The keyboards root is fixed when the loader is created; see
/// [`LoaderConfig::resolve_root`] for how it is chosen.
///
/// # Examples
///
/// ```rust,no_run
/// use keyloom::{KeyboardLoader, config::LoaderConfig};
///
/// // Keyboards bundled with the crate
/// let loader = KeyboardLoader::default();
/// let keyboard = loader.load("us").expect("Failed to load keyboard");
/// println!("{} keys", keyboard.keys().len());
///
/// // Keyboards from a directory
/// let config = LoaderConfig::default().with_keyboards_dir("/usr/share/keyloom/keyboards");
/// let loader = KeyboardLoader::new(config);
/// ```
#[derive(Debug)]
pub struct KeyboardLoader {
    config: LoaderConfig,
    root: ResourceName,
}

impl Default for KeyboardLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl KeyboardLoader {
    /// Create a new loader with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Loader configuration, including the keyboards root
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use keyloom::{KeyboardLoader, config::LoaderConfig};
    ///
    /// let loader = KeyboardLoader::new(LoaderConfig::default());
    /// ```
    pub fn new(config: LoaderConfig) -> Self {
        let root = config.resolve_root();
        debug!(root:% = root; "Keyboards root resolved");
        Self { config, root }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the keyboards root this loader reads from.
    pub fn root(&self) -> &ResourceName {
        &self.root
    }

    /// Read the catalog below the keyboards root.
    ///
    /// # Errors
    ///
    /// Returns `KeyloomError` when the catalog cannot be opened or parsed.
    pub fn catalog(&self) -> Result<Catalog, KeyloomError> {
        Catalog::load(&self.root)
    }

    /// List the keyboards declared by the catalog, in document order.
    ///
    /// # Errors
    ///
    /// Returns `KeyloomError` when the catalog cannot be opened or parsed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use keyloom::KeyboardLoader;
    ///
    /// let loader = KeyboardLoader::default();
    /// for keyboard in loader.list_keyboards().expect("Failed to read catalog") {
    ///     println!("{}", keyboard.id());
    /// }
    /// ```
    pub fn list_keyboards(&self) -> Result<Vec<KeyboardDescriptor>, KeyloomError> {
        Ok(self.catalog()?.list().to_vec())
    }

    /// Load the keyboard with the given catalog id.
    ///
    /// This reads the catalog, the keyboard's geometry document and its
    /// symbols documents, following includes, and links the result into a
    /// keyboard model.
    ///
    /// # Arguments
    ///
    /// * `id` - Keyboard id as declared in the catalog
    ///
    /// # Errors
    ///
    /// Returns `KeyloomError::Keyboard` wrapping the cause: an unknown id,
    /// an unreadable or malformed document, a keyboard without symbols, an
    /// include cycle or an undefined outline.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use keyloom::KeyboardLoader;
    ///
    /// let loader = KeyboardLoader::default();
    /// let keyboard = loader.load("de").expect("Failed to load keyboard");
    /// let key = keyboard.find_key("AD06").expect("Key exists");
    /// ```
    pub fn load(&self, id: &str) -> Result<KeyboardModel, KeyloomError> {
        info!(keyboard = id; "Loading keyboard");
        self.catalog()
            .and_then(|catalog| {
                let descriptor = catalog.resolve(id)?.clone();
                debug!(
                    keyboard = id,
                    geometry = descriptor.geometry(),
                    symbols:? = descriptor.symbols();
                    "Keyboard resolved"
                );
                self.load_unwrapped(descriptor)
            })
            .map_err(|source| KeyloomError::Keyboard {
                keyboard: id.to_string(),
                source: Box::new(source),
            })
    }

    /// Load a keyboard from a descriptor, without consulting the catalog.
    ///
    /// # Errors
    ///
    /// Same as [`KeyboardLoader::load`], except that the id is never unknown.
    pub fn load_descriptor(
        &self,
        descriptor: KeyboardDescriptor,
    ) -> Result<KeyboardModel, KeyloomError> {
        let keyboard = descriptor.id().to_string();
        info!(keyboard = keyboard.as_str(); "Loading keyboard from descriptor");
        self.load_unwrapped(descriptor)
            .map_err(|source| KeyloomError::Keyboard {
                keyboard,
                source: Box::new(source),
            })
    }

    fn load_unwrapped(&self, descriptor: KeyboardDescriptor) -> Result<KeyboardModel, KeyloomError> {
        let Some(symbols) = descriptor.symbols().map(str::to_string) else {
            return Err(KeyloomError::MissingSymbols(descriptor.id().to_string()));
        };

        let resource = self.root.geometry(descriptor.geometry());
        debug!(geometry:% = resource; "Reading geometry");
        let mut geometry = resource.read_with(parse_geometry)?;

        let mut loaded = HashSet::new();
        includes::load_symbols_with_prerequisites(&self.root, &symbols, &mut geometry, &mut loaded)?;
        debug!(documents = loaded.len(); "Symbols applied");

        let model = assemble::assemble(descriptor, geometry)?;
        trace!(model:?; "Assembled keyboard");
        info!(keyboard = model.descriptor().id(), keys = model.keys().len(); "Keyboard loaded");
        Ok(model)
    }
}
