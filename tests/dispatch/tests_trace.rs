//! Trace lines emitted around parser activations.

use std::panic::{AssertUnwindSafe, catch_unwind};

use cfg_dispatch::lexer::{ContextId, KeywordTable};
use cfg_dispatch::{
    CollectingReporter, DispatchConfig, Dispatcher, FnGrammar, Lexer, Parsed, ParserDescriptor,
    Registry,
};

use crate::helpers::grammars::{Counters, config_registry};
use crate::helpers::observer::RecordingObserver;
use crate::helpers::source_fixtures::*;

fn trace(source: &str, enabled: bool) -> (RecordingObserver, bool) {
    let counters = Counters::default();
    let registry = config_registry(&counters);
    let reporter = CollectingReporter::new();
    let observer = RecordingObserver::new();
    let mut lexer = Lexer::new(source).unwrap();
    let ok = Dispatcher::new(&registry)
        .with_config(DispatchConfig::new().with_trace(enabled))
        .with_reporter(&reporter)
        .with_observer(&observer)
        .parse_main(&mut lexer)
        .is_ok();
    (observer, ok)
}

#[test]
fn test_nested_trace_lines() {
    let (observer, ok) = trace(FULL_CONFIG, true);
    assert!(ok);
    assert_eq!(
        observer.lines(),
        [
            "Starting parser main",
            "Starting parser source statement",
            "Stopping parser source statement, result: 1",
            "Starting parser destination statement",
            "Stopping parser destination statement, result: 1",
            "Stopping parser main, result: 1",
        ]
    );
    assert!(observer.is_balanced());
}

#[test]
fn test_failure_reports_zero_result() {
    let (observer, ok) = trace(UNKNOWN_SOURCE_DRIVER, true);
    assert!(!ok);
    assert_eq!(
        observer.lines(),
        [
            "Starting parser main",
            "Starting parser source statement",
            "Stopping parser source statement, result: 0",
            "Stopping parser main, result: 0",
        ]
    );
}

#[test]
fn test_trace_disabled_is_silent() {
    let (observer, ok) = trace(FULL_CONFIG, false);
    assert!(ok);
    assert!(observer.lines().is_empty());
}

#[test]
fn test_trace_balanced_on_every_fixture() {
    for source in [
        SIMPLE_SOURCE,
        SIMPLE_DESTINATION,
        MISSING_SEMICOLON_AFTER_BLOCK,
        BLOCK_WITHOUT_PARSER,
        UNKNOWN_TOP_LEVEL,
        EMPTY,
    ] {
        let (observer, _) = trace(source, true);
        assert!(observer.is_balanced(), "unbalanced trace for {source:?}: {:?}", observer.lines());
    }
}

#[test]
fn test_missing_block_grammar_traces_only_main() {
    let (observer, _) = trace(BLOCK_WITHOUT_PARSER, true);
    assert_eq!(
        observer.lines(),
        ["Starting parser main", "Stopping parser main, result: 0"]
    );
}

#[test]
fn test_panicking_entry_point_still_closes_its_trace_lines() {
    let mut registry = Registry::new();
    registry
        .register_main(ParserDescriptor::new(
            "outer",
            "outer",
            KeywordTable::empty(),
            FnGrammar::new(|lexer: &mut Lexer<'_>, dispatcher: &Dispatcher<'_>| {
                match dispatcher.delegate(&ContextId::new("boom"), lexer) {
                    Ok(instance) => Parsed::Complete(instance),
                    Err(_) => Parsed::failed(),
                }
            }),
        ))
        .unwrap();
    registry
        .register(ParserDescriptor::new(
            "boom",
            "boom",
            KeywordTable::empty(),
            FnGrammar::new(|_: &mut Lexer<'_>, _: &Dispatcher<'_>| -> Parsed { panic!("grammar bug") }),
        ))
        .unwrap();

    let observer = RecordingObserver::new();
    let mut lexer = Lexer::new("").unwrap();
    let dispatcher = Dispatcher::new(&registry)
        .with_config(DispatchConfig::new().with_trace(true))
        .with_observer(&observer);
    let outcome = catch_unwind(AssertUnwindSafe(|| dispatcher.parse_main(&mut lexer)));

    assert!(outcome.is_err());
    assert_eq!(lexer.context_depth(), 0);
    assert_eq!(
        observer.lines(),
        [
            "Starting parser outer",
            "Starting parser boom",
            "Stopping parser boom, result: 0",
            "Stopping parser outer, result: 0",
        ]
    );
    assert!(observer.is_balanced());
}
