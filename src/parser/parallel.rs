//! Parse several configuration sources concurrently
//!
//! Every source gets its own [`Lexer`], and with it its own context stack;
//! only the registry (immutable apart from the atomic debug mirrors) is
//! shared between workers.

use rayon::prelude::*;
use smol_str::SmolStr;

use super::dispatch::Dispatcher;
use super::grammar::Instance;
use super::registry::Registry;
use crate::config::DispatchConfig;
use crate::diagnostics::{CollectingReporter, ErrorReporter, SyntaxError};
use crate::error::DispatchError;
use crate::lexer::Lexer;

/// A named configuration text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

impl<'a> Source<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }
}

/// Result of parsing one source with the main parser
#[derive(Debug)]
pub struct SourceOutcome {
    pub name: SmolStr,
    pub result: Result<Instance, DispatchError>,
    /// Syntax errors reported while parsing this source
    pub errors: Vec<SyntaxError>,
}

impl SourceOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parse every source with the registry's main parser, in parallel.
///
/// Outcomes come back in input order. Errors are collected per source and
/// also forwarded to `forward`, when given.
pub fn parse_sources(
    registry: &Registry,
    config: DispatchConfig,
    sources: &[Source<'_>],
    forward: Option<&dyn ErrorReporter>,
) -> Vec<SourceOutcome> {
    sources
        .par_iter()
        .map(|source| {
            let collector = CollectingReporter::new();
            let result = match Lexer::new(source.text) {
                Ok(lexer) => {
                    let mut lexer = lexer.with_source_name(source.name);
                    let result = Dispatcher::new(registry)
                        .with_config(config)
                        .with_reporter(&collector)
                        .parse_main(&mut lexer);
                    debug_assert_eq!(lexer.context_depth(), 0);
                    result
                }
                Err(err) => Err(err.into()),
            };

            let errors = collector.take();
            if let Some(forward) = forward {
                for error in &errors {
                    forward.report(error);
                }
            }
            tracing::debug!(
                source = source.name,
                ok = result.is_ok(),
                errors = errors.len(),
                "parsed configuration source"
            );
            SourceOutcome {
                name: source.name.into(),
                result,
                errors,
            }
        })
        .collect()
}
