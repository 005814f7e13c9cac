//! Error attribution and reporting across nested grammars.

use cfg_dispatch::diagnostics::ErrorCode;
use cfg_dispatch::lexer::{ContextId, KeywordTable};
use cfg_dispatch::{
    CollectingReporter, ContextError, DispatchError, Dispatcher, FnGrammar, Lexer, Parsed,
    ParserDescriptor, Registry, RegistryError,
};

use crate::helpers::grammars::{Config, Counters, config_registry, root_keywords};
use crate::helpers::source_fixtures::*;

fn parse(source: &str) -> (Result<Config, DispatchError>, CollectingReporter) {
    let counters = Counters::default();
    let registry = config_registry(&counters);
    let reporter = CollectingReporter::new();
    let mut lexer = Lexer::new(source).unwrap().with_source_name("syslog.conf");
    let result = Dispatcher::new(&registry)
        .with_reporter(&reporter)
        .dispatch_as::<Config>(registry.main().unwrap(), &mut lexer);
    assert_eq!(lexer.context_depth(), 0);
    (result, reporter)
}

#[test]
fn test_error_in_block_names_the_block_grammar() {
    let (result, reporter) = parse(UNKNOWN_SOURCE_DRIVER);
    assert_eq!(result.unwrap_err(), DispatchError::rejected("main"));

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].context, "source statement");
    assert_eq!(errors[0].code, ErrorCode::E0901);
    assert_eq!(
        errors[0].to_string(),
        "Error parsing source statement, syntax error, unexpected 'bogus', expecting driver in syslog.conf:4:5-4:9"
    );
}

#[test]
fn test_error_after_block_names_the_main_grammar() {
    let (result, reporter) = parse(MISSING_SEMICOLON_AFTER_BLOCK);
    assert!(result.is_err());

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].context, "main");
    assert!(errors[0].message.contains("unexpected end of input"));
}

#[test]
fn test_error_at_top_level() {
    let (result, reporter) = parse(UNKNOWN_TOP_LEVEL);
    assert!(result.is_err());
    let errors = reporter.errors();
    assert_eq!(errors[0].context, "main");
    assert_eq!(errors[0].location.start.line, 1);
    assert_eq!(errors[0].location.start.column, 1);
}

#[test]
fn test_stray_character_is_a_lexical_error() {
    let (result, reporter) = parse(STRAY_CHARACTER);
    assert!(result.is_err());

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0101);
    assert_eq!(errors[0].context, "source statement");
    assert_eq!(errors[0].message, "syntax error, unexpected '@', expecting driver");
}

#[test]
fn test_missing_block_grammar_is_reported() {
    let (result, reporter) = parse(BLOCK_WITHOUT_PARSER);
    assert!(result.is_err());

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0401);
    assert_eq!(errors[0].context, "main");
    assert!(errors[0].message.contains("no parser registered for context parser"));
}

#[test]
fn test_obsolete_keyword_still_parses() {
    let (result, reporter) = parse(OBSOLETE_KEYWORD);
    let config = result.unwrap();
    assert!(reporter.is_empty());
    assert_eq!(config.sources[0].drivers[0].name, "sync");
}

#[test]
fn test_delegating_to_unknown_context() {
    let registry = Registry::new();
    let mut lexer = Lexer::new("").unwrap();
    let err = Dispatcher::new(&registry)
        .delegate(&ContextId::new("filter"), &mut lexer)
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::Registry(RegistryError::NotFound(ContextId::new("filter")))
    );
    assert_eq!(err.to_string(), "no parser registered for context filter");
}

#[test]
fn test_no_main_parser() {
    let registry = Registry::new();
    let mut lexer = Lexer::new("").unwrap();
    let err = Dispatcher::new(&registry).parse_main(&mut lexer).unwrap_err();
    assert_eq!(err, DispatchError::Registry(RegistryError::NoMainParser));
}

#[test]
fn test_duplicate_context_registration() {
    let mut registry = Registry::new();
    let grammar = || FnGrammar::new(|_: &mut Lexer<'_>, _: &Dispatcher<'_>| Parsed::failed());
    registry
        .register(ParserDescriptor::new("root", "main", root_keywords(), grammar()))
        .unwrap();
    let err = registry
        .register(ParserDescriptor::new("root", "other", KeywordTable::empty(), grammar()))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateContext(ContextId::new("root")));
    assert_eq!(registry.lookup(&ContextId::new("root")).unwrap().name(), "main");
}

#[test]
fn test_pop_on_empty_stack_is_an_error() {
    let mut lexer = Lexer::new("source").unwrap();
    assert_eq!(lexer.pop_context().unwrap_err(), ContextError::EmptyStackPop);
    assert_eq!(lexer.context_depth(), 0);
}

#[test]
fn test_error_outside_any_context_uses_default_description() {
    let lexer = Lexer::new("").unwrap();
    let reporter = CollectingReporter::new();
    let error = cfg_dispatch::diagnostics::report_syntax_error(
        &reporter,
        &lexer,
        lexer.last_location(),
        "unexpected end of input",
    );
    assert_eq!(error.context, "configuration");
    assert_eq!(reporter.len(), 1);
}

#[test]
fn test_excerpt_marks_the_offending_line() {
    let (_, reporter) = parse(UNKNOWN_SOURCE_DRIVER);
    let excerpt = reporter.errors()[0].render_excerpt(UNKNOWN_SOURCE_DRIVER);
    assert!(excerpt.contains("4   ---->     bogus();"));
    assert!(excerpt.contains("3             internal();"));
}
