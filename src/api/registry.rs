//! Component registry.
//!
//! Maps a component identifier (e.g. `"bazel"`) to its optional collector,
//! validator and reactor plus its [`Capabilities`]. Components keep their
//! insertion order, which is the order the executor runs them in.
//!
//! Registering a role that is already filled replaces the previous entry;
//! the last registration wins.

use super::capability::Capabilities;
use super::collector::Collector;
use super::reactor::Reactor;
use super::validator::Validator;

/// Everything registered under one identifier.
#[derive(Default)]
pub struct ComponentEntry {
    id: String,
    collector: Option<Box<dyn Collector>>,
    validator: Option<Box<dyn Validator>>,
    reactor: Option<Box<dyn Reactor>>,
    capabilities: Capabilities,
}

impl ComponentEntry {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Component identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registered collector, if any.
    pub fn collector(&self) -> Option<&dyn Collector> {
        self.collector.as_deref()
    }

    /// Registered validator, if any.
    pub fn validator(&self) -> Option<&dyn Validator> {
        self.validator.as_deref()
    }

    /// Registered reactor, if any.
    pub fn reactor(&self) -> Option<&dyn Reactor> {
        self.reactor.as_deref()
    }

    /// Eligibility metadata.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl std::fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("id", &self.id)
            .field("collector", &self.collector.is_some())
            .field("validator", &self.validator.is_some())
            .field("reactor", &self.reactor.is_some())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Ordered registry of components.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<ComponentEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, id: &str) -> &mut ComponentEntry {
        let index = match self.entries.iter().position(|e| e.id == id) {
            Some(index) => index,
            None => {
                self.entries.push(ComponentEntry::new(id));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Register the collector for `id`.
    pub fn register_collector(&mut self, id: &str, collector: impl Collector + 'static) {
        let entry = self.entry_mut(id);
        if entry.collector.is_some() {
            tracing::warn!("Replacing collector registered for '{}'", id);
        }
        entry.collector = Some(Box::new(collector));
    }

    /// Register the validator for `id`.
    pub fn register_validator(&mut self, id: &str, validator: impl Validator + 'static) {
        let entry = self.entry_mut(id);
        if entry.validator.is_some() {
            tracing::warn!("Replacing validator registered for '{}'", id);
        }
        entry.validator = Some(Box::new(validator));
    }

    /// Register the reactor for `id`.
    pub fn register_reactor(&mut self, id: &str, reactor: impl Reactor + 'static) {
        let entry = self.entry_mut(id);
        if entry.reactor.is_some() {
            tracing::warn!("Replacing reactor registered for '{}'", id);
        }
        entry.reactor = Some(Box::new(reactor));
    }

    /// Set the capabilities for `id`.
    pub fn set_capabilities(&mut self, id: &str, capabilities: Capabilities) {
        self.entry_mut(id).capabilities = capabilities;
    }

    /// Look up a component.
    pub fn get(&self, id: &str) -> Option<&ComponentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentEntry> {
        self.entries.iter()
    }

    /// Registered identifiers in order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
