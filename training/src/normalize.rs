//! Product name normalisation: lowercase, punctuation split, English stemming.

use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer, TokenStream};

/// Reusable analyzer; tokenising needs `&mut self`, so keep one per worker.
pub struct NameNormalizer {
    analyzer: TextAnalyzer,
}

impl NameNormalizer {
    pub fn new() -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(Language::English))
            .build();
        Self { analyzer }
    }

    /// Stemmed tokens joined by single spaces. Anything that is not
    /// alphanumeric separates tokens, so newlines and punctuation never reach
    /// the output.
    pub fn normalize(&mut self, name: &str) -> String {
        let mut tokens = Vec::new();
        let mut stream = self.analyzer.token_stream(name);
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        tokens.join(" ")
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
