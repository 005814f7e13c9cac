//! Grammar fragment interface
//!
//! A grammar pulls tokens from the lexer and produces an opaque result. It may
//! delegate a nested sub-range of its input to another registered grammar
//! through the [`Dispatcher`] it is handed.

use std::any::Any;
use std::fmt;

use super::dispatch::Dispatcher;
use crate::lexer::Lexer;

/// Opaque result handle produced by a grammar
pub type Instance = Box<dyn Any + Send>;

/// Outcome of one grammar entry point invocation
pub enum Parsed {
    /// Parsing succeeded; ownership of the result moves to the caller
    Complete(Instance),
    /// Parsing failed, possibly leaving a partially built result behind
    Failed(Option<Instance>),
}

impl Parsed {
    pub fn complete<T: Any + Send>(value: T) -> Self {
        Self::Complete(Box::new(value))
    }

    /// Failure with nothing to release
    pub fn failed() -> Self {
        Self::Failed(None)
    }

    /// Failure with a partial result that must go through cleanup
    pub fn failed_with<T: Any + Send>(partial: T) -> Self {
        Self::Failed(Some(Box::new(partial)))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl fmt::Debug for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(_) => f.write_str("Complete(..)"),
            Self::Failed(None) => f.write_str("Failed(None)"),
            Self::Failed(Some(_)) => f.write_str("Failed(Some(..))"),
        }
    }
}

/// One pluggable grammar fragment
///
/// Entry points must report syntax errors through the dispatcher's reporter
/// and then return [`Parsed::Failed`]; they never pop lexer contexts.
pub trait Grammar: Send + Sync {
    /// Parse starting at the lexer's current token
    fn parse(&self, lexer: &mut Lexer<'_>, dispatcher: &Dispatcher<'_>) -> Parsed;

    /// Release a partial result after a failed parse.
    ///
    /// The default just drops it.
    fn cleanup(&self, instance: Instance) {
        drop(instance);
    }

    /// Whether [`cleanup`](Self::cleanup) does more than drop
    fn has_cleanup(&self) -> bool {
        false
    }
}

type CleanupFn = Box<dyn Fn(Instance) + Send + Sync>;

/// [`Grammar`] built from closures
pub struct FnGrammar<P> {
    parse: P,
    cleanup: Option<CleanupFn>,
}

impl<P> FnGrammar<P>
where
    P: Fn(&mut Lexer<'_>, &Dispatcher<'_>) -> Parsed + Send + Sync,
{
    pub fn new(parse: P) -> Self {
        Self {
            parse,
            cleanup: None,
        }
    }

    pub fn with_cleanup(mut self, cleanup: impl Fn(Instance) + Send + Sync + 'static) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }
}

impl<P> Grammar for FnGrammar<P>
where
    P: Fn(&mut Lexer<'_>, &Dispatcher<'_>) -> Parsed + Send + Sync,
{
    fn parse(&self, lexer: &mut Lexer<'_>, dispatcher: &Dispatcher<'_>) -> Parsed {
        (self.parse)(lexer, dispatcher)
    }

    fn cleanup(&self, instance: Instance) {
        match &self.cleanup {
            Some(cleanup) => cleanup(instance),
            None => drop(instance),
        }
    }

    fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }
}
