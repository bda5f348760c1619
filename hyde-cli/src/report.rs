//! Console rendering of a [`HydeQueryResult`].

use std::fmt::Write;

use hyde_rag::HydeQueryResult;

const RULE: &str = "--------------------------------";

/// Render the three numbered sections.
pub fn render(query: &str, result: &HydeQueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nProcessing query: {query}");

    let _ = writeln!(out, "\n1. Generated hypothetical answer:\n{RULE}");
    let _ = writeln!(out, "{}", result.hypothetical_answer);

    let _ = writeln!(out, "\n2. Retrieved relevant documents using HyDE:\n{RULE}");
    if result.retrieved_documents.is_empty() {
        let _ = writeln!(out, "\n(no documents)");
    }
    for document in &result.retrieved_documents {
        let _ = writeln!(out, "\nDocument id {}:", document.id);
        let _ = writeln!(out, "{}", document.content);
    }

    let _ = writeln!(out, "\n3. Final answer (grounded in real documents):\n{RULE}");
    let _ = writeln!(out, "{}", result.final_answer);
    out
}

/// Render an error with its source chain and backtrace.
pub fn render_error(err: &anyhow::Error) -> String {
    let mut out = format!("Error occurred: {err}\n");
    for cause in err.chain().skip(1) {
        let _ = writeln!(out, "  caused by: {cause}");
    }
    let _ = write!(out, "{}", err.backtrace());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyde_rag::Document;

    fn result(documents: Vec<Document>) -> HydeQueryResult {
        HydeQueryResult {
            hypothetical_answer: "Meditation probably lowers cortisol.".to_string(),
            retrieved_documents: documents,
            final_answer: "Meditation lowers cortisol (document id 1).".to_string(),
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let text = render(
            "Does meditation help?",
            &result(vec![
                Document::new("1", "Meditation lowers cortisol.", "inline"),
                Document::new("4", "Mindfulness thickens the cortex.", "inline"),
            ]),
        );

        let hypothesis = text.find("1. Generated hypothetical answer:").unwrap();
        let retrieved = text.find("2. Retrieved relevant documents using HyDE:").unwrap();
        let first = text.find("Document id 1:").unwrap();
        let second = text.find("Document id 4:").unwrap();
        let answer = text.find("3. Final answer (grounded in real documents):").unwrap();
        assert!(hypothesis < retrieved && retrieved < first && first < second && second < answer);
        assert!(text.starts_with("\nProcessing query: Does meditation help?"));
        assert!(text.ends_with("Meditation lowers cortisol (document id 1).\n"));
    }

    #[test]
    fn empty_retrieval_is_called_out() {
        let text = render("q", &result(Vec::new()));
        assert!(text.contains("(no documents)"));
        assert!(!text.contains("Document id"));
    }

    #[test]
    fn error_lists_every_cause() {
        let err = anyhow::Error::new(hyde_rag::HydeError::Config("bad url".to_string()))
            .context("retrieval failed");
        let text = render_error(&err);
        assert!(text.starts_with("Error occurred: retrieval failed\n"));
        assert!(text.contains("caused by: Configuration error: bad url"));
    }
}
