//! Dispatcher: runs one grammar fragment with guaranteed context hygiene
//!
//! ```text
//! dispatch(descriptor)
//!     ↓ mirror trace setting into descriptor debug flag
//!     ↓ push ContextFrame (context, keywords, name)
//! grammar.parse(lexer, dispatcher) ──→ dispatch(nested) ... (re-entrant)
//!     ↓ pop ContextFrame (also on unwind)
//!     ↓ cleanup partial result on failure
//! Result<Instance, DispatchError>
//! ```

use std::any::Any;
use std::ops::{Deref, DerefMut};

use super::descriptor::ParserDescriptor;
use super::grammar::{Instance, Parsed};
use super::registry::Registry;
use crate::base::Location;
use crate::config::DispatchConfig;
use crate::diagnostics::{
    ErrorCode, ErrorReporter, SyntaxError, TracingReporter, report_syntax_error,
};
use crate::error::DispatchError;
use crate::lexer::{ContextId, Lexer, Token, TokenKind};

static TRACING_REPORTER: TracingReporter = TracingReporter;
static TRACING_OBSERVER: TracingObserver = TracingObserver;

/// Receives the trace lines of parser activations
///
/// Only called when tracing is enabled in the [`DispatchConfig`].
pub trait DispatchObserver: Send + Sync {
    /// Called before the entry point runs; `depth` is the stack depth
    /// before this activation's frame is pushed
    fn starting(&self, descriptor: &ParserDescriptor, depth: usize);

    /// Called after the frame is popped
    fn stopping(&self, descriptor: &ParserDescriptor, depth: usize, success: bool);
}

/// Writes trace lines through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn starting(&self, descriptor: &ParserDescriptor, depth: usize) {
        tracing::debug!(depth, "Starting parser {}", descriptor.name());
    }

    fn stopping(&self, descriptor: &ParserDescriptor, depth: usize, success: bool) {
        tracing::debug!(
            depth,
            "Stopping parser {}, result: {}",
            descriptor.name(),
            u8::from(success)
        );
    }
}

/// Keeps one activation's frame on the lexer for as long as it lives
///
/// Dropping the guard restores the stack to the depth it had before the
/// push, which also covers unwinding out of a panicking entry point.
pub struct ContextGuard<'l, 'src> {
    lexer: &'l mut Lexer<'src>,
    depth: usize,
}

impl<'l, 'src> ContextGuard<'l, 'src> {
    pub fn enter(lexer: &'l mut Lexer<'src>, descriptor: &ParserDescriptor) -> Self {
        let depth = lexer.context_depth();
        lexer.push_context(
            descriptor.context().clone(),
            descriptor.keywords().clone(),
            descriptor.name(),
        );
        Self { lexer, depth }
    }
}

impl<'src> Deref for ContextGuard<'_, 'src> {
    type Target = Lexer<'src>;

    fn deref(&self) -> &Self::Target {
        self.lexer
    }
}

impl DerefMut for ContextGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.lexer
    }
}

impl Drop for ContextGuard<'_, '_> {
    fn drop(&mut self) {
        let expected = self.depth + 1;
        let depth = self.lexer.context_depth();
        if depth > expected {
            tracing::warn!(
                expected,
                depth,
                context = %self.lexer.current_context_description(),
                "grammar left nested lexer contexts active, unwinding them"
            );
        }
        while self.lexer.context_depth() > self.depth {
            if self.lexer.pop_context().is_err() {
                break;
            }
        }
        if depth < expected {
            tracing::error!(
                expected,
                depth,
                "lexer context popped behind the dispatcher's back"
            );
            if !std::thread::panicking() {
                debug_assert!(depth >= expected, "lexer context stack underflow");
            }
        }
    }
}

/// Pairs the "Starting" trace line of one activation with its "Stopping"
/// line, including when the entry point unwinds
struct TraceScope<'a> {
    observer: &'a dyn DispatchObserver,
    descriptor: &'a ParserDescriptor,
    depth: usize,
    finished: bool,
}

impl<'a> TraceScope<'a> {
    fn start(observer: &'a dyn DispatchObserver, descriptor: &'a ParserDescriptor, depth: usize) -> Self {
        observer.starting(descriptor, depth);
        Self {
            observer,
            descriptor,
            depth,
            finished: false,
        }
    }

    fn finish(mut self, success: bool) {
        self.finished = true;
        self.observer.stopping(self.descriptor, self.depth, success);
    }
}

impl Drop for TraceScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.observer.stopping(self.descriptor, self.depth, false);
        }
    }
}

/// Runs grammar fragments against a lexer
///
/// Cheap to copy around; holds only references and the configuration.
/// Re-entrant: a grammar delegates by calling back into the dispatcher it
/// was handed.
#[derive(Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    config: DispatchConfig,
    reporter: &'r dyn ErrorReporter,
    observer: &'r dyn DispatchObserver,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: DispatchConfig::default(),
            reporter: &TRACING_REPORTER,
            observer: &TRACING_OBSERVER,
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reporter(mut self, reporter: &'r dyn ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_observer(mut self, observer: &'r dyn DispatchObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    pub fn trace_enabled(&self) -> bool {
        self.config.trace
    }

    pub fn reporter(&self) -> &'r dyn ErrorReporter {
        self.reporter
    }

    /// Run `descriptor`'s grammar starting at the lexer's current token.
    ///
    /// The descriptor's frame is pushed for the duration of the call and
    /// popped on every exit path. A failed parse never hands its partial
    /// result to the caller: it goes through the grammar's cleanup exactly
    /// once and the caller gets [`DispatchError::Rejected`].
    pub fn dispatch(
        &self,
        descriptor: &ParserDescriptor,
        lexer: &mut Lexer<'_>,
    ) -> Result<Instance, DispatchError> {
        let trace = self.config.trace;
        let depth = lexer.context_depth();
        let scope = trace.then(|| TraceScope::start(self.observer, descriptor, depth));
        descriptor.set_debug(trace);

        let parsed = {
            let mut frame = ContextGuard::enter(lexer, descriptor);
            descriptor.grammar().parse(&mut frame, self)
        };

        let result = match parsed {
            Parsed::Complete(instance) => Ok(instance),
            Parsed::Failed(partial) => {
                if let Some(instance) = partial {
                    descriptor.cleanup(instance);
                }
                Err(DispatchError::rejected(descriptor.name()))
            }
        };

        if let Some(scope) = scope {
            scope.finish(result.is_ok());
        }
        result
    }

    /// [`dispatch`](Self::dispatch) and take the result as a concrete type.
    ///
    /// A result of another type is released through cleanup.
    pub fn dispatch_as<T: Any + Send>(
        &self,
        descriptor: &ParserDescriptor,
        lexer: &mut Lexer<'_>,
    ) -> Result<T, DispatchError> {
        let instance = self.dispatch(descriptor, lexer)?;
        match instance.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(instance) => {
                descriptor.cleanup(instance);
                Err(DispatchError::UnexpectedInstance {
                    parser: descriptor.name().into(),
                    expected: std::any::type_name::<T>(),
                })
            }
        }
    }

    /// Delegate to the grammar registered for `context`
    pub fn delegate(
        &self,
        context: &ContextId,
        lexer: &mut Lexer<'_>,
    ) -> Result<Instance, DispatchError> {
        let descriptor = self.registry.lookup(context)?;
        self.dispatch(descriptor, lexer)
    }

    pub fn delegate_as<T: Any + Send>(
        &self,
        context: &ContextId,
        lexer: &mut Lexer<'_>,
    ) -> Result<T, DispatchError> {
        let descriptor = self.registry.lookup(context)?;
        self.dispatch_as(descriptor, lexer)
    }

    /// Run the registry's main parser
    pub fn parse_main(&self, lexer: &mut Lexer<'_>) -> Result<Instance, DispatchError> {
        let descriptor = self.registry.main()?;
        self.dispatch(descriptor, lexer)
    }

    /// Report a syntax error attributed to the lexer's innermost context
    pub fn report_syntax_error(
        &self,
        lexer: &Lexer<'_>,
        location: Location,
        message: impl Into<String>,
    ) -> SyntaxError {
        report_syntax_error(self.reporter, lexer, location, message)
    }

    /// Report `token` as unexpected where `expecting` was wanted.
    ///
    /// Scanner error tokens are coded as lexical errors.
    pub fn report_unexpected(
        &self,
        lexer: &Lexer<'_>,
        token: &Token<'_>,
        expecting: &str,
    ) -> SyntaxError {
        let code = match token.kind {
            TokenKind::Error => ErrorCode::E0101,
            _ => ErrorCode::E0901,
        };
        let error = SyntaxError::builder(code)
            .message(format!("syntax error, unexpected {token}, expecting {expecting}"))
            .location(token.location.clone())
            .build();
        self.report(lexer, error)
    }

    /// Report a prepared error, stamping it with the innermost context
    pub fn report(&self, lexer: &Lexer<'_>, mut error: SyntaxError) -> SyntaxError {
        error.context = lexer.current_context_description().into();
        self.reporter.report(&error);
        error
    }
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("parsers", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}
