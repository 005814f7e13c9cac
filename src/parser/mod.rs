//! Grammar dispatch core
//!
//! This module lets independently written grammar fragments share one lexer
//! and one error pipeline:
//! - **descriptor** - static record of a fragment (context, name, keywords, grammar)
//! - **registry** - descriptors keyed by context, with one main parser
//! - **dispatch** - runs a fragment with push/pop of its lexer context
//! - **parallel** - one lexer per source, several sources at once
//!
//! ## Delegation
//!
//! ```text
//! Dispatcher::parse_main
//!     ↓ push "main"
//! main grammar ── sees `source s { ... }`
//!     ↓ Dispatcher::delegate("source")
//!     ↓ push "source"
//! source grammar ── parses the block body
//!     ↓ pop "source"
//! main grammar ── continues after the block
//!     ↓ pop "main"
//! ```

mod descriptor;
mod dispatch;
mod grammar;
mod parallel;
mod registry;

pub use descriptor::{ParserDescriptor, ParserDescriptorBuilder};
pub use dispatch::{ContextGuard, DispatchObserver, Dispatcher, TracingObserver};
pub use grammar::{FnGrammar, Grammar, Instance, Parsed};
pub use parallel::{Source, SourceOutcome, parse_sources};
pub use registry::Registry;
