//! Morphological token model.
//!
//! # Responsibility
//! - Capture one word occurrence with its analyzer-derived attributes.
//! - Render the token into artifact text.
//!
//! # Invariants
//! - `surface_text` is never empty.
//! - `grammar_tags.is_some()` implies `lemma.is_some()`.
//! - Tokens are immutable after construction.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Construction errors for [`MorphologicalToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Surface text is empty or whitespace-only.
    EmptySurface,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySurface => write!(f, "token surface text must not be empty"),
        }
    }
}

impl Error for TokenError {}

/// One analyzed word occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphologicalToken {
    surface_text: String,
    lemma: Option<String>,
    grammar_tags: Option<String>,
}

impl MorphologicalToken {
    /// Creates a token from its surface form and optional analysis.
    ///
    /// Tags supplied without a lemma are dropped.
    ///
    /// # Errors
    /// - Returns [`TokenError::EmptySurface`] for blank surface text.
    pub fn new(
        surface_text: impl Into<String>,
        lemma: Option<String>,
        grammar_tags: Option<String>,
    ) -> Result<Self, TokenError> {
        let surface_text = surface_text.into();
        if surface_text.trim().is_empty() {
            return Err(TokenError::EmptySurface);
        }

        let grammar_tags = if lemma.is_some() { grammar_tags } else { None };
        Ok(Self {
            surface_text,
            lemma,
            grammar_tags,
        })
    }

    /// Original, case-preserving surface form.
    pub fn surface_text(&self) -> &str {
        &self.surface_text
    }

    /// Lowercased surface form.
    pub fn cleaned_surface(&self) -> String {
        self.surface_text.to_lowercase()
    }

    /// Returns `(lemma, grammar_tags)`; either may be absent.
    pub fn tagged_form(&self) -> (Option<&str>, Option<&str>) {
        (self.lemma.as_deref(), self.grammar_tags.as_deref())
    }

    /// Renders the `word<lemma>(tags)` artifact line.
    ///
    /// Absent fields render empty here only; token state keeps them absent.
    pub fn single_tagged(&self) -> String {
        let (lemma, tags) = self.tagged_form();
        format!(
            "{}<{}>({})",
            self.cleaned_surface(),
            lemma.unwrap_or_default(),
            tags.unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MorphologicalToken, TokenError};

    #[test]
    fn new_rejects_blank_surface() {
        let err = MorphologicalToken::new("  ", None, None).expect_err("blank must fail");
        assert_eq!(err, TokenError::EmptySurface);
    }

    #[test]
    fn tags_without_lemma_are_dropped() {
        let token = MorphologicalToken::new("Слово", None, Some("S,сред".to_string()))
            .expect("token should build");
        assert_eq!(token.tagged_form(), (None, None));
    }

    #[test]
    fn lemma_without_tags_is_kept() {
        let token = MorphologicalToken::new("Слово", Some("слово".to_string()), None)
            .expect("token should build");
        assert_eq!(token.tagged_form(), (Some("слово"), None));
    }

    #[test]
    fn empty_lemma_stays_distinct_from_absent() {
        let token = MorphologicalToken::new("и", Some(String::new()), None)
            .expect("token should build");
        assert_eq!(token.tagged_form(), (Some(""), None));
    }

    #[test]
    fn cleaned_surface_lowercases_cyrillic() {
        let token = MorphologicalToken::new("Пример", None, None).expect("token should build");
        assert_eq!(token.cleaned_surface(), "пример");
        assert_eq!(token.surface_text(), "Пример");
    }

    #[test]
    fn single_tagged_renders_lemma_and_tags() {
        let token = MorphologicalToken::new(
            "Текста",
            Some("текст".to_string()),
            Some("S,муж,неод=род,ед".to_string()),
        )
        .expect("token should build");
        assert_eq!(token.single_tagged(), "текста<текст>(S,муж,неод=род,ед)");
    }

    #[test]
    fn single_tagged_renders_absent_fields_empty() {
        let token = MorphologicalToken::new("Текста", None, None).expect("token should build");
        assert_eq!(token.single_tagged(), "текста<>()");
    }
}
