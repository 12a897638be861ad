//! Plugin module loading boundary
//!
//! This module defines the trait-based abstraction for the one piece of OS interaction the driver needs:
//! - Module loading (open a dynamic library by path)
//! - Entry point lookup (resolve the fixed plugin symbol)
//!
//! Keeping these behind `ModuleLoader`/`LoadedModule` lets the driver be exercised with in-process fakes.
//! The default implementation opens real libraries through `libloading`.

#![allow(unsafe_code)]

use std::fmt;
use std::path::{Path, PathBuf};

use libloading::Library;
use plugtest_core::{PLUGIN_ENTRY_SYMBOL, PlugInEntryPoint, TestPlugIn};
use thiserror::Error;

/// Errors raised while loading a module or resolving its entry point.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load module: {}", path.display())]
    Module {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to find exported function named '{symbol}'")]
    SymbolNotFound { symbol: &'static str },
}

// ============================================================================
// Module Loader Interface
// ============================================================================

/// Open a plugin module by path.
pub trait ModuleLoader {
    /// Load the module at `path`. The returned value owns the module; dropping it unloads the module.
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>, LoadError>;
}

/// A loaded plugin module.
pub trait LoadedModule {
    /// Path the module was loaded from.
    fn path(&self) -> &Path;

    /// Look up the fixed plugin entry point.
    fn resolve_factory(&self) -> Result<PlugInFactory<'_>, LoadError>;
}

/// What the entry point hands back: the plugin interface, or the message of a panic raised building it.
pub type PlugInInterface<'m> = Result<&'m (dyn TestPlugIn + 'm), String>;

/// The plugin's entry point, usable only while its module stays loaded.
pub struct PlugInFactory<'m> {
    make: Box<dyn Fn() -> PlugInInterface<'m> + 'm>,
}

impl<'m> PlugInFactory<'m> {
    pub fn new<F>(make: F) -> Self
    where
        F: Fn() -> PlugInInterface<'m> + 'm,
    {
        Self { make: Box::new(make) }
    }

    /// Call the entry point and return the plugin interface it exposes.
    pub fn invoke(&self) -> PlugInInterface<'m> {
        (self.make)()
    }
}

impl fmt::Debug for PlugInFactory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlugInFactory").finish_non_exhaustive()
    }
}

// ============================================================================
// Default Implementation
// ============================================================================

/// Loads modules from disk as dynamic libraries.
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibLoader;

impl ModuleLoader for DylibLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>, LoadError> {
        // SAFETY: loading runs the library's initialisers. The user asked for this module by path and
        // accepts that its initialisers execute in this process.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Module {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        tracing::debug!(module = %path.display(), "module loaded");

        Ok(Box::new(DylibModule {
            path: path.to_path_buf(),
            library: Some(library),
        }))
    }
}

/// A dynamic library opened by [`DylibLoader`]. Unloaded on drop.
pub struct DylibModule {
    path: PathBuf,
    library: Option<Library>,
}

impl LoadedModule for DylibModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_factory(&self) -> Result<PlugInFactory<'_>, LoadError> {
        let not_found = LoadError::SymbolNotFound {
            symbol: PLUGIN_ENTRY_SYMBOL,
        };
        let Some(library) = self.library.as_ref() else {
            return Err(not_found);
        };

        // SAFETY: plugins export this symbol through `export_test_plugin!`, which fixes its type to
        // `PlugInEntryPoint`. The function pointer is copied out of the symbol; the returned factory borrows
        // `self`, so it cannot be called after the library is unloaded.
        let entry: PlugInEntryPoint = match unsafe { library.get::<PlugInEntryPoint>(PLUGIN_ENTRY_SYMBOL.as_bytes()) } {
            Ok(symbol) => *symbol,
            Err(e) => {
                tracing::debug!(module = %self.path.display(), error = %e, "entry point lookup failed");
                return Err(not_found);
            }
        };

        Ok(PlugInFactory::new(move || entry().map(|plugin| plugin as &dyn TestPlugIn)))
    }
}

impl Drop for DylibModule {
    fn drop(&mut self) {
        if let Some(library) = self.library.take() {
            match library.close() {
                Ok(()) => tracing::debug!(module = %self.path.display(), "module unloaded"),
                Err(e) => tracing::warn!(module = %self.path.display(), error = %e, "failed to unload module"),
            }
        }
    }
}

impl fmt::Debug for DylibModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DylibModule").field("path", &self.path).finish_non_exhaustive()
    }
}
