//! Keyword tables pushed onto the lexer by each grammar fragment
//!
//! A table maps reserved spellings to the grammar's own token ids. Spellings
//! are compared after normalizing `-` to `_`, so `flush-lines` and
//! `flush_lines` name the same keyword.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::KeywordError;

/// Grammar-defined token identifier returned for a recognized keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub u32);

impl TokenId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Whether a keyword is still current
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeywordStatus {
    #[default]
    Normal,
    /// Still recognized, but the lexer warns when it is used
    Obsolete { explanation: SmolStr },
}

/// A reserved word and the token it lexes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub spelling: SmolStr,
    pub token: TokenId,
    pub status: KeywordStatus,
}

impl Keyword {
    pub fn new(spelling: impl Into<SmolStr>, token: TokenId) -> Self {
        Self {
            spelling: spelling.into(),
            token,
            status: KeywordStatus::Normal,
        }
    }

    pub fn obsolete(mut self, explanation: impl Into<SmolStr>) -> Self {
        self.status = KeywordStatus::Obsolete {
            explanation: explanation.into(),
        };
        self
    }

    pub fn is_obsolete(&self) -> bool {
        matches!(self.status, KeywordStatus::Obsolete { .. })
    }
}

/// How keyword lookup treats the frames below this one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordScope {
    /// Fall back to outer frames when a word is not found here
    #[default]
    Inherit,
    /// Stop lookup at this frame; outer keywords lex as identifiers
    Isolated,
}

/// Immutable keyword set of one grammar fragment
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    keywords: FxHashMap<SmolStr, Keyword>,
    scope: KeywordScope,
}

impl KeywordTable {
    /// An empty table that inherits everything from outer frames
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn builder() -> KeywordTableBuilder {
        KeywordTableBuilder::default()
    }

    /// Build an inheriting table from `(spelling, token)` pairs
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, TokenId)>,
    ) -> Result<Arc<Self>, KeywordError> {
        pairs
            .into_iter()
            .fold(Self::builder(), |builder, (spelling, token)| {
                builder.keyword(spelling, token)
            })
            .build()
    }

    /// Look up a word, normalizing `-` to `_`
    pub fn get(&self, word: &str) -> Option<&Keyword> {
        if word.contains('-') {
            self.keywords.get(normalize(word).as_str())
        } else {
            self.keywords.get(word)
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn scope(&self) -> KeywordScope {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.values()
    }
}

/// Builder for [`KeywordTable`]; validation happens in [`build`](Self::build)
#[derive(Debug, Default)]
pub struct KeywordTableBuilder {
    keywords: Vec<Keyword>,
    scope: KeywordScope,
}

impl KeywordTableBuilder {
    pub fn keyword(mut self, spelling: impl Into<SmolStr>, token: TokenId) -> Self {
        self.keywords.push(Keyword::new(spelling, token));
        self
    }

    pub fn obsolete_keyword(
        mut self,
        spelling: impl Into<SmolStr>,
        token: TokenId,
        explanation: impl Into<SmolStr>,
    ) -> Self {
        self.keywords
            .push(Keyword::new(spelling, token).obsolete(explanation));
        self
    }

    pub fn scope(mut self, scope: KeywordScope) -> Self {
        self.scope = scope;
        self
    }

    /// Stop keyword lookup at this table
    pub fn isolated(self) -> Self {
        self.scope(KeywordScope::Isolated)
    }

    pub fn build(self) -> Result<Arc<KeywordTable>, KeywordError> {
        let mut keywords =
            FxHashMap::with_capacity_and_hasher(self.keywords.len(), Default::default());
        for keyword in self.keywords {
            if !is_valid_spelling(&keyword.spelling) {
                return Err(KeywordError::InvalidSpelling(keyword.spelling));
            }
            let key = normalize(&keyword.spelling);
            if keywords.contains_key(&key) {
                return Err(KeywordError::Duplicate(keyword.spelling));
            }
            keywords.insert(key, keyword);
        }
        Ok(Arc::new(KeywordTable {
            keywords,
            scope: self.scope,
        }))
    }
}

fn normalize(word: &str) -> SmolStr {
    if word.contains('-') {
        SmolStr::from(word.replace('-', "_"))
    } else {
        SmolStr::from(word)
    }
}

/// Same alphabet as the scanner's word rule: `[A-Za-z_][A-Za-z0-9_\-\.]*`
fn is_valid_spelling(spelling: &str) -> bool {
    let mut chars = spelling.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
