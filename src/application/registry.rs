//! Clipboard format registry
//!
//! Maps format identifiers to descriptors and back. Predefined formats are
//! seeded at construction; anything else is resolved through the backend
//! the first time it is seen and cached for the life of the registry.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::domain::format::{FormatDescriptor, ALL_STANDARD_FORMATS};

use super::ports::ClipboardBackend;

static SHARED: OnceLock<Arc<FormatRegistry>> = OnceLock::new();

#[derive(Default)]
struct Tables {
    by_id: HashMap<u32, FormatDescriptor>,
    /// Keyed by lowercased name
    by_name: HashMap<String, FormatDescriptor>,
}

impl Tables {
    fn insert(&mut self, format: FormatDescriptor) {
        self.by_name
            .entry(format.name().to_lowercase())
            .or_insert_with(|| format.clone());
        self.by_id.entry(format.id()).or_insert(format);
    }
}

/// Bidirectional id/name registry of clipboard formats
pub struct FormatRegistry {
    tables: Mutex<Tables>,
}

impl FormatRegistry {
    /// Create a registry seeded with the predefined formats
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for format in ALL_STANDARD_FORMATS {
            tables.insert(FormatDescriptor::from(*format));
        }
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// The process-wide registry used with the system clipboard
    pub fn shared() -> Arc<FormatRegistry> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(FormatRegistry::new())))
    }

    /// Descriptor for `id`, asking the backend for its name on first sight.
    ///
    /// Ids the OS cannot name are cached as "Unknown" and never re-queried.
    pub fn resolve<B: ClipboardBackend + ?Sized>(&self, backend: &B, id: u32) -> FormatDescriptor {
        let mut tables = self.tables.lock();
        if let Some(format) = tables.by_id.get(&id) {
            return format.clone();
        }

        let format = match backend.format_name(id) {
            Some(name) => FormatDescriptor::named(id, name),
            None => FormatDescriptor::unknown(id),
        };
        tracing::debug!(id, name = format.name(), "resolved clipboard format");
        tables.insert(format.clone());
        format
    }

    /// Descriptor for a format name, registering it with the OS if needed.
    ///
    /// Name lookup is case-insensitive. Returns `None` when the OS refuses
    /// the registration.
    pub fn resolve_by_name<B: ClipboardBackend + ?Sized>(
        &self,
        backend: &B,
        name: &str,
    ) -> Option<FormatDescriptor> {
        if let Some(format) = self.tables.lock().by_name.get(&name.to_lowercase()) {
            return Some(format.clone());
        }

        match backend.register_format(name) {
            0 => {
                tracing::warn!(name, "clipboard format registration failed");
                None
            }
            id => Some(self.resolve(backend, id)),
        }
    }

    /// Cached descriptor for `id`, without touching the backend
    pub fn get(&self, id: u32) -> Option<FormatDescriptor> {
        self.tables.lock().by_id.get(&id).cloned()
    }

    /// Number of distinct identifiers known
    pub fn len(&self) -> usize {
        self.tables.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::format::StandardFormat;
    use crate::infrastructure::clipboard::MemoryClipboard;

    #[test]
    fn standard_formats_are_seeded() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.len(), ALL_STANDARD_FORMATS.len());
        assert_eq!(registry.get(13).unwrap().name(), "Unicode");
    }

    #[test]
    fn standard_formats_bypass_backend() {
        let backend = MemoryClipboard::new();
        let registry = FormatRegistry::new();

        let format = registry.resolve(&backend, StandardFormat::HDrop.id());
        assert_eq!(format.name(), "HDrop");
        assert_eq!(backend.name_queries(), 0);
    }

    #[test]
    fn unknown_id_resolves_once() {
        let backend = MemoryClipboard::new();
        let registry = FormatRegistry::new();

        let first = registry.resolve(&backend, 0xC7FF);
        let second = registry.resolve(&backend, 0xC7FF);

        assert_eq!(first, second);
        assert_eq!(first.name(), "Unknown");
        assert!(!first.has_name());
        assert_eq!(backend.name_queries(), 1);
    }

    #[test]
    fn registered_name_is_resolved_through_backend() {
        let backend = MemoryClipboard::new();
        let id = backend.register_format("Custom Thing");
        let registry = FormatRegistry::new();

        let format = registry.resolve(&backend, id);
        assert_eq!(format.name(), "Custom Thing");
        assert!(format.has_name());
    }

    #[test]
    fn resolve_by_name_is_case_insensitive() {
        let backend = MemoryClipboard::new();
        let registry = FormatRegistry::new();

        let first = registry.resolve_by_name(&backend, "HTML Format").unwrap();
        let second = registry.resolve_by_name(&backend, "html format").unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(backend.registrations(), 1);
    }

    #[test]
    fn resolve_by_name_finds_standard_formats() {
        let backend = MemoryClipboard::new();
        let registry = FormatRegistry::new();

        let format = registry.resolve_by_name(&backend, "unicode").unwrap();
        assert_eq!(format.id(), 13);
        assert_eq!(backend.registrations(), 0);
    }

    #[test]
    fn failed_registration_yields_none() {
        let backend = MemoryClipboard::new();
        let registry = FormatRegistry::new();

        assert!(registry.resolve_by_name(&backend, "").is_none());
    }

    #[test]
    fn shared_registry_is_a_singleton() {
        assert!(Arc::ptr_eq(&FormatRegistry::shared(), &FormatRegistry::shared()));
    }
}
