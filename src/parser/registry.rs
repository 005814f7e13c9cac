//! Registry of known parser descriptors
//!
//! Built once at startup and passed by reference to every
//! [`Dispatcher`](super::Dispatcher). One descriptor may be marked as the main
//! (root) parser.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::descriptor::ParserDescriptor;
use crate::error::RegistryError;
use crate::lexer::ContextId;

/// Parser descriptors keyed by lexical context, in registration order
#[derive(Debug, Default)]
pub struct Registry {
    parsers: IndexMap<ContextId, ParserDescriptor, FxBuildHasher>,
    main: Option<ContextId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor; its context must not be registered yet
    pub fn register(&mut self, descriptor: ParserDescriptor) -> Result<(), RegistryError> {
        let context = descriptor.context().clone();
        if self.parsers.contains_key(&context) {
            return Err(RegistryError::DuplicateContext(context));
        }
        tracing::debug!(context = %context, name = %descriptor.name(), "registered parser");
        self.parsers.insert(context, descriptor);
        Ok(())
    }

    /// Add a descriptor and mark it as the main parser
    pub fn register_main(&mut self, descriptor: ParserDescriptor) -> Result<(), RegistryError> {
        let context = descriptor.context().clone();
        self.register(descriptor)?;
        self.main = Some(context);
        Ok(())
    }

    /// Mark an already registered descriptor as the main parser
    pub fn set_main(&mut self, context: &ContextId) -> Result<(), RegistryError> {
        if !self.parsers.contains_key(context) {
            return Err(RegistryError::NotFound(context.clone()));
        }
        self.main = Some(context.clone());
        Ok(())
    }

    pub fn lookup(&self, context: &ContextId) -> Result<&ParserDescriptor, RegistryError> {
        self.parsers
            .get(context)
            .ok_or_else(|| RegistryError::NotFound(context.clone()))
    }

    pub fn main(&self) -> Result<&ParserDescriptor, RegistryError> {
        let context = self.main.as_ref().ok_or(RegistryError::NoMainParser)?;
        self.lookup(context)
    }

    pub fn contains(&self, context: &ContextId) -> bool {
        self.parsers.contains_key(context)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParserDescriptor> {
        self.parsers.values()
    }

    pub fn contexts(&self) -> impl Iterator<Item = &ContextId> {
        self.parsers.keys()
    }
}
