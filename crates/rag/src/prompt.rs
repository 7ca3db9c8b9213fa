//! RAG prompt template rendering.

use crate::types::ScoredChunk;
use docrag_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Instruction template for grounded question answering.
///
/// The trailing `Answer:` cue lets the pipeline split the model's raw
/// output and keep only the answer text.
const RAG_TEMPLATE: &str = "\
You are a professional assistant. Answer the user's question using ONLY the context below.
Answer in a clear, concise, and professional manner (2-5 sentences).
Do NOT hallucinate; if the answer is not in the context, say \"I don't know.\"

--- CONTEXT ---
{{context}}
--- CONTEXT ---

User Question:
{{question}}

Answer:";

/// Join retrieved chunks into a single context block.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the RAG prompt for a question and its retrieved context.
pub fn build_prompt(question: &str, chunks: &[ScoredChunk]) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("context".to_string(), build_context(chunks));
    variables.insert("question".to_string(), question.to_string());

    render_template(RAG_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(text: &str) -> ScoredChunk {
        ScoredChunk {
            source: "doc.txt".to_string(),
            text: text.to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn test_build_context_joins_chunks() {
        let context = build_context(&[scored("first chunk"), scored("second chunk")]);
        assert_eq!(context, "first chunk\n\nsecond chunk");
    }

    #[test]
    fn test_build_prompt_contains_parts() {
        let prompt =
            build_prompt("What services do you offer?", &[scored("We offer SEO.")]).unwrap();

        assert!(prompt.contains("--- CONTEXT ---"));
        assert!(prompt.contains("We offer SEO."));
        assert!(prompt.contains("What services do you offer?"));
        assert!(prompt.trim_end().ends_with("Answer:"));
    }

    #[test]
    fn test_build_prompt_no_html_escaping() {
        let prompt = build_prompt("a < b?", &[scored("x & y")]).unwrap();
        assert!(prompt.contains("a < b?"));
        assert!(prompt.contains("x & y"));
    }

    #[test]
    fn test_build_prompt_empty_context() {
        let prompt = build_prompt("anything", &[]).unwrap();
        assert!(prompt.contains("--- CONTEXT ---\n\n--- CONTEXT ---"));
    }
}
