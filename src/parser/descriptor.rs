//! Parser descriptors: the static record of one grammar fragment

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use smol_str::SmolStr;

use super::grammar::{Grammar, Instance};
use crate::lexer::{ContextId, KeywordTable};

/// Describes one pluggable grammar fragment
///
/// Created at startup and never mutated afterwards, apart from the debug
/// mirror which every dispatch refreshes from the trace setting.
pub struct ParserDescriptor {
    context: ContextId,
    name: SmolStr,
    keywords: Arc<KeywordTable>,
    grammar: Box<dyn Grammar>,
    debug: AtomicBool,
}

impl ParserDescriptor {
    /// An empty `name` falls back to the context id.
    pub fn new(
        context: impl Into<ContextId>,
        name: impl Into<SmolStr>,
        keywords: Arc<KeywordTable>,
        grammar: impl Grammar + 'static,
    ) -> Self {
        let context = context.into();
        let mut name = name.into();
        if name.is_empty() {
            name = SmolStr::new(context.as_str());
        }
        Self {
            context,
            name,
            keywords,
            grammar: Box::new(grammar),
            debug: AtomicBool::new(false),
        }
    }

    /// Start a descriptor with an empty keyword table, named after `context`
    pub fn builder(context: impl Into<ContextId>, grammar: impl Grammar + 'static) -> ParserDescriptorBuilder {
        ParserDescriptorBuilder {
            context: context.into(),
            name: None,
            keywords: KeywordTable::empty(),
            grammar: Box::new(grammar),
        }
    }

    pub fn context(&self) -> &ContextId {
        &self.context
    }

    /// Diagnostic label used in trace lines and syntax errors
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &Arc<KeywordTable> {
        &self.keywords
    }

    pub fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_ref()
    }

    /// Whether the grammar should produce its own verbose tracing
    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub(crate) fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    /// Hand a partial result to the grammar's cleanup
    pub(crate) fn cleanup(&self, instance: Instance) {
        tracing::trace!(parser = %self.name, "releasing partial result");
        self.grammar.cleanup(instance);
    }
}

impl fmt::Debug for ParserDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserDescriptor")
            .field("context", &self.context)
            .field("name", &self.name)
            .field("keywords", &self.keywords.len())
            .field("debug", &self.debug_enabled())
            .finish()
    }
}

/// Builder for [`ParserDescriptor`]
pub struct ParserDescriptorBuilder {
    context: ContextId,
    name: Option<SmolStr>,
    keywords: Arc<KeywordTable>,
    grammar: Box<dyn Grammar>,
}

impl ParserDescriptorBuilder {
    pub fn name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn keywords(mut self, keywords: Arc<KeywordTable>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn build(self) -> ParserDescriptor {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => SmolStr::new(self.context.as_str()),
        };
        ParserDescriptor {
            context: self.context,
            name,
            keywords: self.keywords,
            grammar: self.grammar,
            debug: AtomicBool::new(false),
        }
    }
}
