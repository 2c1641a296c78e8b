use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::TrellisConfig;
use crate::error::RegistryError;
use crate::guess::{CriticalityScoreGuesser, DocumentTypeGuesser};
use crate::parse::{CriticalityScoreParser, DocumentParser, ParserFactory};
use crate::types::{DocumentType, FormatType};

/// Guessers and parser factories keyed by the document type they handle.
///
/// Populated once at process start; lookups never mutate it.
#[derive(Debug)]
pub struct Registry {
    guessers: BTreeMap<DocumentType, Arc<dyn DocumentTypeGuesser>>,
    parsers: BTreeMap<DocumentType, ParserFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            guessers: BTreeMap::new(),
            parsers: BTreeMap::new(),
        }
    }

    /// Every built-in document type.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        for doc_type in DocumentType::BUILTIN {
            reg.register_builtin(doc_type);
        }
        reg
    }

    /// Only the document types enabled in `config.processor`.
    pub fn from_config(config: &TrellisConfig) -> crate::error::Result<Self> {
        let mut reg = Self::new();
        for doc_type in config.processor.document_types()? {
            reg.register_builtin(doc_type);
        }
        Ok(reg)
    }

    fn register_builtin(&mut self, doc_type: DocumentType) {
        match doc_type {
            DocumentType::CriticalityScore => self.register(
                doc_type,
                Arc::new(CriticalityScoreGuesser),
                CriticalityScoreParser::boxed,
            ),
            other => debug!(doc_type = %other, "No built-in parser"),
        }
    }

    /// Register a guesser and parser factory for `doc_type`, replacing any previous pair.
    pub fn register(
        &mut self,
        doc_type: DocumentType,
        guesser: Arc<dyn DocumentTypeGuesser>,
        factory: ParserFactory,
    ) {
        self.register_guesser(doc_type, guesser);
        self.register_parser(doc_type, factory);
    }

    pub fn register_guesser(&mut self, doc_type: DocumentType, guesser: Arc<dyn DocumentTypeGuesser>) {
        self.guessers.insert(doc_type, guesser);
    }

    pub fn register_parser(&mut self, doc_type: DocumentType, factory: ParserFactory) {
        self.parsers.insert(doc_type, factory);
    }

    /// Classify a blob against every registered guesser.
    ///
    /// Returns the type only when exactly one type claims the blob. No claim,
    /// or claims from several types, yields [`DocumentType::Unknown`].
    pub fn guess(&self, blob: &[u8], format: FormatType) -> DocumentType {
        let mut claimed: Vec<DocumentType> = Vec::new();
        for guesser in self.guessers.values() {
            let guessed = guesser.guess_document_type(blob, format);
            if guessed != DocumentType::Unknown && !claimed.contains(&guessed) {
                debug!(guesser = guesser.name(), doc_type = %guessed, "Guesser matched");
                claimed.push(guessed);
            }
        }

        match claimed.as_slice() {
            [] => DocumentType::Unknown,
            [only] => *only,
            many => {
                warn!(candidates = ?many, %format, "Ambiguous document, treating as unknown");
                DocumentType::Unknown
            }
        }
    }

    /// A fresh, single-use parser for `doc_type`.
    pub fn parser_for(
        &self,
        doc_type: DocumentType,
    ) -> Result<Box<dyn DocumentParser>, RegistryError> {
        self.parsers
            .get(&doc_type)
            .map(|factory| factory())
            .ok_or(RegistryError::NoParser(doc_type))
    }

    /// Document types with a registered parser, in stable order.
    pub fn document_types(&self) -> Vec<DocumentType> {
        self.parsers.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
