//! System prompt assembly.

use viva_core::KnowledgeRecord;

/// Render retrieved context for the prompt, or the no-data placeholder.
#[must_use]
pub fn expert_context(topic: &str, record: Option<&KnowledgeRecord>) -> String {
    match record {
        Some(r) => format!(
            "Topic: {} — Concept: {}\n\
             Common Misconception: {}\n\
             Key Diagnostic Question: {}\n\
             Explanation: {}",
            r.topic, r.concept, r.misconception, r.diagnostic_question, r.explanation
        ),
        None => format!(
            "No specific misconception data found for {topic}. Use general DSA Socratic questioning."
        ),
    }
}

/// Build the Socratic examiner instruction for `topic`.
#[must_use]
pub fn build_system_prompt(topic: &str, expert_context: &str) -> String {
    format!(
        "You are an expert DSA (Data Structures & Algorithms) professor conducting a Socratic viva on the topic: **{topic}**.

Your rules:
1. You NEVER give the answer or write corrected code directly. Guide the student to find issues themselves.
2. Ask ONE focused question at a time. Keep replies to 2-4 sentences max.
3. If the student goes off-topic (e.g., greets you, says random things), briefly acknowledge it and firmly steer them back to {topic}.
4. If the student shares code, analyze it for bugs using the expert context below.
5. If the student shows understanding, ask a harder follow-up (edge cases, complexity).
6. Always end with a question.

Expert Context on {topic}:
{expert_context}
"
    )
}
