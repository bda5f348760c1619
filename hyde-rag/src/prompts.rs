//! Prompt templates for the hypothesize and synthesize stages.

use crate::document::Document;

/// Prompt asking the model for the answer a high-quality source document on
/// the topic would contain.
pub fn hypothetical_answer_prompt(query: &str) -> String {
    format!(
        "Generate a direct, factual answer to this question: \"{query}\"\n\
         The answer should be what you'd expect to find in a high-quality document about this topic.\n\
         Focus on specific details and facts that would help identify relevant documents.\n\
         \n\
         Answer:\n"
    )
}

/// Render retrieved documents as a context block, one labeled source per
/// paragraph. No documents renders as an empty string.
pub fn source_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("Source (document id {}, {}): {}", doc.id, doc.source, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt asking the model to answer `query` strictly from `documents`,
/// citing document ids and acknowledging gaps.
pub fn grounded_answer_prompt(query: &str, documents: &[Document]) -> String {
    let context = source_context(documents);
    format!(
        "Question: {query}\n\
         \n\
         Using only the information from these sources, provide a well-supported answer:\n\
         {context}\n\
         \n\
         Requirements:\n\
         1. Only use information from the provided sources\n\
         2. Cite the document id as source, when making specific claims\n\
         3. If the sources don't fully answer the question, acknowledge this\n\
         \n\
         Answer:\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothetical_prompt_quotes_query() {
        let prompt = hypothetical_answer_prompt("Why is the sky blue?");
        assert!(prompt.starts_with(
            "Generate a direct, factual answer to this question: \"Why is the sky blue?\"\n"
        ));
        assert!(prompt.contains("high-quality document"));
        assert!(prompt.ends_with("Answer:\n"));
    }

    #[test]
    fn grounded_prompt_labels_sources() {
        let docs = vec![
            Document::new("1", "Cortisol drops.", "study.txt"),
            Document::new("2", "Sleep improves.", "inline"),
        ];
        let prompt = grounded_answer_prompt("Does meditation help?", &docs);
        assert!(prompt.starts_with("Question: Does meditation help?\n\n"));
        assert!(prompt.contains(
            "Source (document id 1, study.txt): Cortisol drops.\n\n\
             Source (document id 2, inline): Sleep improves."
        ));
        assert!(prompt.contains("2. Cite the document id as source"));
    }

    #[test]
    fn grounded_prompt_with_no_sources_keeps_structure() {
        let prompt = grounded_answer_prompt("Anything?", &[]);
        assert!(prompt.contains("provide a well-supported answer:\n\n\nRequirements:"));
        assert!(prompt.contains("acknowledge this"));
    }
}
