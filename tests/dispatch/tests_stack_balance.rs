//! The context stack returns to its entry depth on every exit path.

use std::panic::{AssertUnwindSafe, catch_unwind};

use rstest::rstest;

use cfg_dispatch::lexer::{ContextId, KeywordTable};
use cfg_dispatch::{CollectingReporter, Dispatcher, FnGrammar, Lexer, Parsed, ParserDescriptor, Registry};

use crate::helpers::grammars::{Counters, config_registry, root_keywords};
use crate::helpers::source_fixtures::*;

#[rstest]
#[case::simple_source(SIMPLE_SOURCE)]
#[case::simple_destination(SIMPLE_DESTINATION)]
#[case::full(FULL_CONFIG)]
#[case::unknown_driver(UNKNOWN_SOURCE_DRIVER)]
#[case::unknown_top_level(UNKNOWN_TOP_LEVEL)]
#[case::missing_semicolon(MISSING_SEMICOLON_AFTER_BLOCK)]
#[case::no_block_parser(BLOCK_WITHOUT_PARSER)]
#[case::obsolete(OBSOLETE_KEYWORD)]
#[case::empty(EMPTY)]
fn test_depth_restored_after_main(#[case] source: &str) {
    let counters = Counters::default();
    let registry = config_registry(&counters);
    let reporter = CollectingReporter::new();
    let mut lexer = Lexer::new(source).unwrap();

    let _ = Dispatcher::new(&registry)
        .with_reporter(&reporter)
        .parse_main(&mut lexer);

    assert_eq!(lexer.context_depth(), 0);
}

#[test]
fn test_depth_restored_relative_to_caller_frames() {
    let counters = Counters::default();
    let registry = config_registry(&counters);
    let mut lexer = Lexer::new(SIMPLE_SOURCE).unwrap();
    lexer.push_context(ContextId::new("include"), root_keywords(), "include");

    Dispatcher::new(&registry).parse_main(&mut lexer).unwrap();

    assert_eq!(lexer.context_depth(), 1);
    assert_eq!(lexer.current_context().unwrap().name, "include");
}

#[test]
fn test_depth_observed_inside_nested_grammar() {
    let mut registry = Registry::new();
    registry
        .register_main(ParserDescriptor::new(
            "outer",
            "outer",
            KeywordTable::empty(),
            FnGrammar::new(|lexer: &mut Lexer<'_>, dispatcher: &Dispatcher<'_>| {
                let before = lexer.context_depth();
                let inner = dispatcher.delegate(&ContextId::new("inner"), lexer);
                let after = lexer.context_depth();
                match inner {
                    Ok(instance) => Parsed::complete((before, *instance.downcast::<usize>().unwrap(), after)),
                    Err(_) => Parsed::failed(),
                }
            }),
        ))
        .unwrap();
    registry
        .register(ParserDescriptor::new(
            "inner",
            "inner",
            KeywordTable::empty(),
            FnGrammar::new(|lexer: &mut Lexer<'_>, _: &Dispatcher<'_>| {
                Parsed::complete(lexer.context_depth())
            }),
        ))
        .unwrap();

    let mut lexer = Lexer::new("").unwrap();
    let depths: (usize, usize, usize) = Dispatcher::new(&registry)
        .dispatch_as(registry.main().unwrap(), &mut lexer)
        .unwrap();

    assert_eq!(depths, (1, 2, 1));
    assert_eq!(lexer.context_depth(), 0);
}

#[test]
fn test_panicking_entry_point_keeps_stack_balanced() {
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
            FnGrammar::new(|lexer: &mut Lexer<'_>, _: &Dispatcher<'_>| -> Parsed {
                let _ = lexer.next_token();
                panic!("grammar bug");
            }),
        ))
        .unwrap();

    let mut lexer = Lexer::new("options { };").unwrap();
    let dispatcher = Dispatcher::new(&registry);
    let outcome = catch_unwind(AssertUnwindSafe(|| dispatcher.parse_main(&mut lexer)));

    assert!(outcome.is_err());
    assert_eq!(lexer.context_depth(), 0);
}

#[test]
fn test_lexer_reusable_after_panic() {
    let counters = Counters::default();
    let mut registry = config_registry(&counters);
    registry
        .register(ParserDescriptor::new(
            "panicky",
            "panicky",
            KeywordTable::empty(),
            FnGrammar::new(|_: &mut Lexer<'_>, _: &Dispatcher<'_>| -> Parsed { panic!("unreachable grammar") }),
        ))
        .unwrap();

    let mut lexer = Lexer::new(SIMPLE_SOURCE).unwrap();
    let dispatcher = Dispatcher::new(&registry);
    let panicked = catch_unwind(AssertUnwindSafe(|| {
        dispatcher.delegate(&ContextId::new("panicky"), &mut lexer)
    }));
    assert!(panicked.is_err());
    assert_eq!(lexer.context_depth(), 0);

    // the stack is clean, so the same lexer can still drive the main parser
    assert!(dispatcher.parse_main(&mut lexer).is_ok());
    assert_eq!(lexer.context_depth(), 0);
}
