//! Retrieval-augmented answer composition.
//!
//! Given a question and a set of selected documents, searches
//! each document's index concurrently, assembles a bounded
//! context from the matched chunks, and builds the prompt for the
//! language model. When no documents are selected or none match,
//! the question is answered from general knowledge instead.

use std::sync::Arc;

use futures::future::join_all;

use crate::core::config::Config;
use crate::core::embed::Embedder;
use crate::core::error::{AskdocError, Result};
use crate::core::llm::LanguageModel;
use crate::core::registry::DocumentRegistry;

/// Style applied to questions shorter than the threshold
const CONCISE_STYLE: &str =
    "Provide a concise answer in 1-3 clear bullet points, including all essential details.";

/// Style applied to everything else
const COMPREHENSIVE_STYLE: &str = "Provide a comprehensive, detailed answer in concise bullet \
     points, covering all relevant aspects of the topic thoroughly.";

/// Substituted when the model returns a blank completion
const FALLBACK_ANSWER: &str = "- I don't know";

/// Matched chunk texts for one contributing document
struct DocumentMatches {
    name: String,
    texts: Vec<String>,
}

/// Builds prompts and produces answers
pub struct AnswerComposer {
    registry: Arc<DocumentRegistry>,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LanguageModel>,
    top_k: usize,
    max_context_chars: usize,
    short_question_chars: usize,
}

impl AnswerComposer {
    pub fn new(
        config: &Config,
        registry: Arc<DocumentRegistry>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            registry,
            embedder,
            llm,
            top_k: config.retrieval.top_k,
            max_context_chars: config.retrieval.max_context_chars,
            short_question_chars: config.retrieval.short_question_chars,
        }
    }

    /// Answer a question, optionally grounded in the selected
    /// documents.
    ///
    /// Documents missing from the registry are silently skipped;
    /// if nothing contributes context the question is answered
    /// from general knowledge. The registry is never mutated.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for an empty question; `CompletionFailed`
    /// if the language-model call itself errors.
    pub async fn answer(&self, question: &str, documents: &[String]) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskdocError::InvalidRequest(
                "Please provide a question".to_string(),
            ));
        }

        let style = self.style_instruction(question);

        let context = if documents.is_empty() {
            None
        } else {
            let matches = self.search_documents(question, documents).await;
            if matches.is_empty() {
                tracing::info!(question, "No relevant document context, answering generally");
                None
            } else {
                let contributing: Vec<&str> =
                    matches.iter().map(|m| m.name.as_str()).collect();
                tracing::info!(documents = ?contributing, "Answering from document context");
                Some(self.build_context(matches))
            }
        };

        let prompt = match &context {
            Some(ctx) => grounded_prompt(ctx, question, style),
            None => general_prompt(question, style),
        };

        let raw = self.llm.complete(&prompt).await?;
        let answer = raw.trim();

        Ok(if answer.is_empty() {
            FALLBACK_ANSWER.to_string()
        } else {
            answer.to_string()
        })
    }

    /// Pick the answer style from the trimmed question length.
    /// The threshold and both styles are fixed policy.
    fn style_instruction(&self, question: &str) -> &'static str {
        if question.chars().count() < self.short_question_chars {
            CONCISE_STYLE
        } else {
            COMPREHENSIVE_STYLE
        }
    }

    /// Search every selected document concurrently.
    ///
    /// Settles when the last search does. Unknown names and
    /// per-document search failures contribute nothing; documents
    /// with zero matches are dropped. Result order follows the
    /// caller-supplied document order, not a global re-ranking.
    async fn search_documents(&self, question: &str, names: &[String]) -> Vec<DocumentMatches> {
        let searches = names.iter().map(|name| async move {
            let index = self.registry.get(name)?;

            match index.search(question, self.top_k, self.embedder.as_ref()).await {
                Ok(hits) if hits.is_empty() => None,
                Ok(hits) => Some(DocumentMatches {
                    name: name.clone(),
                    texts: hits.into_iter().map(|h| h.text).collect(),
                }),
                Err(e) => {
                    tracing::warn!(document = %name, error = %e, "Search failed, skipping document");
                    None
                }
            }
        });

        join_all(searches).await.into_iter().flatten().collect()
    }

    /// Concatenate matched chunks and apply the hard context cap.
    ///
    /// The cap is applied after concatenation, so a later
    /// document's contribution may be cut off.
    fn build_context(&self, matches: Vec<DocumentMatches>) -> String {
        let joined = matches
            .into_iter()
            .flat_map(|m| m.texts)
            .collect::<Vec<String>>()
            .join("\n\n");

        truncate_chars(&joined, self.max_context_chars)
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn grounded_prompt(context: &str, question: &str, style: &str) -> String {
    format!(
        "You are an intelligent AI assistant. Use only the context below to answer \
         the question. {style} If the context doesn't contain enough information, \
         respond with a single bullet point: \"I don't know.\"\n\
         Context:\n{context}\n\
         Question: {question}\n\
         Answer:"
    )
}

fn general_prompt(question: &str, style: &str) -> String {
    format!(
        "You are an intelligent AI assistant. Answer the question based on your \
         general knowledge. {style} If you don't know the answer, respond with a \
         single bullet point: \"I don't know.\"\n\
         Question: {question}\n\
         Answer:"
    )
}
