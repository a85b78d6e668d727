use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

pub const ATTACHED_CONTENT_PLACEHOLDER: &str = "[SEE ATTACHED IMAGES/DOCUMENTS]";

pub const STRICT_JSON_SUFFIX: &str =
    "\n\nCRITICAL: Return ONLY valid JSON. No markdown, no commentary, just the JSON array.";

pub const STRICT_SUMMARY_SUFFIX: &str =
    "\n\nCRITICAL: Return ONLY the summary in the requested format.";

pub const QUIZ_GENERATION_PROMPT: &str = "You are an expert educational assessment writer. Build a multiple-choice quiz from the ACTUAL content supplied below.

REQUIREMENTS:
1. Every question must test a specific fact, definition, formula or example from the material.
2. Questions should test understanding, not surface recall.
3. Wrong options must be plausible yet clearly incorrect given the content.
4. Explanations must point back to the source material.

QUIZ PARAMETERS:
- Number of questions: {num_questions}
- Difficulty: {difficulty} (easy = recall, medium = application, hard = analysis and evaluation)
- Question type: {question_type} (mcq, true_false or mixed)
- Focus: {quiz_focus} (comprehensive, key_concepts or application)

Give each question 4 options and do not repeat topics.

RESPOND WITH VALID JSON ONLY:
[
  {
    \"question\": \"<question grounded in the content>\",
    \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],
    \"correct_answer\": \"Option A\",
    \"explanation\": \"<why, citing the material>\"
  }
]

CONTENT:
{content}
";

pub const FLASHCARD_GENERATION_PROMPT: &str = "You are a learning-science specialist. Write flashcards that maximise recall and retention, using the real terms, definitions, formulas and examples from the content below.

FLASHCARD PARAMETERS:
- Number of cards: {num_cards}
- Card style: {card_style} (standard = term/definition, question = question/answer, concept = explain-a-concept, application = scenario/solution)
- Focus area: {focus_area} (all, definitions, concepts, formulas or examples)

FRONT: one or two lines that test recall of a specific idea from the material.
BACK: a complete answer with the core definition, why it matters, a concrete example and, where useful, a mnemonic. Use bullet points and **bold** key terms.

Cover every major concept, mix definitions with processes and applications, and avoid duplicate cards.

RESPOND WITH VALID JSON ONLY:
[
  {
    \"front\": \"<recall prompt>\",
    \"back\": \"<comprehensive answer>\"
  }
]

CONTENT:
{content}
";

pub const SUMMARIZATION_PROMPT: &str = "You are an academic content analyst. Write a detailed summary that extracts the ACTUAL information in the content below: facts, definitions, numbers, formulas, steps and examples, not just a description of what the document covers.

SUMMARY MODE: {summary_mode} (standard, brief, detailed or eli5)
SUMMARY FORMAT: {summary_format} (bullet_points, paragraph, outline or key_terms)
FOCUS AREA: {focus_area} (general, technical, conceptual or exam_prep)

STRUCTURE:
## Key Concepts
## Detailed Summary
## Important Terms & Definitions
## Additional Details

Someone reading only your summary should be able to learn the material.

CONTENT:
{content}
";

pub const ASSIGNMENT_SOLVER_PROMPT: &str = "You are a precise academic assistant answering questions for the subject \"{subject}\".

QUESTIONS:
{questions}

RULES:
1. No preamble or sign-off; start with the first answer.
2. For MCQs give only the option letter and text, e.g. \"**Answer: B) Mitochondria**\".
3. Every statement must be factually correct.

ANSWER STYLE: {style}
MARK LEVEL: {marks} marks

{marks_instructions}

FORMATTING:
- `## Q1. <question>` headings per question
- Markdown tables for comparisons
- **Bold** key terms, bullet points for lists, LaTeX for formulas

Answer EVERY question at a depth that matches {marks} marks.

BEGIN ANSWERS:";

pub const LAB_SOLVER_PROMPT: &str = "You are a programming expert. Solve these lab questions for \"{subject}\" in {language}.

QUESTIONS:
{questions}

RULES:
1. Start directly with the solution.
2. Code must be complete, with every import, and ready to run.
3. No pseudocode unless asked for.

ANSWER STYLE: {style}
{style_instructions}

FOR EACH QUESTION:
1. `## <number>. <short title>`
2. One or two sentences on the approach.
3. The bolded filename, then a ```{language_lower} code block.
4. A block with the expected output.
5. Time and space complexity in a `>` blockquote.

SOLVE NOW:";

pub const STUDY_HELPER_PROMPT: &str = "You are an interactive tutor for \"{subject}\".

QUESTIONS/TOPICS:
{questions}

CONTEXT:
- Difficulty: {difficulty}
- Mode: {study_mode}
- Persona: {tutor_persona}

PERSONA: {persona_instructions}
LEVEL: {difficulty_instructions}
DEPTH: {study_mode_instructions}

RULES:
1. Teach the concept directly, without greetings.
2. Use `## <topic>` headers, bullet points and short paragraphs.
3. End each section with `> Takeaway: ...`.

TEACH NOW:";

pub const UPLOAD_ASSIGNMENT_PROMPT: &str = "You are an educational AI assistant. A student has uploaded an assignment file.

ASSIGNMENT CONTENT:
{extracted_text}

INSTRUCTIONS:
1. Decide whether this is a Multiple Choice Question (MCQ) bank or a regular assignment.
2. For MCQs give ONLY the correct answers as a numbered list (\"Q1: B\", \"Q2: A\"), without explanations.
3. For a regular assignment give step-by-step solutions with clear explanations, formulas and calculations, and highlight the final answers.

FORMAT:
- `##` headings for sections
- **Bold** important terms
- Numbered lists for steps, bullet points for key concepts

Provide clear, well-formatted answers.";

/// Fills `{name}` slots in `template` in a single pass. Inserted values are never
/// rescanned, and unknown slots are left untouched.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_template_fills_every_occurrence() {
        let rendered = render_template("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(rendered, "x and x then y");
    }

    #[test]
    fn render_template_leaves_unknown_slots() {
        assert_eq!(render_template("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn quiz_prompt_keeps_json_example_braces() {
        let rendered = render_template(
            QUIZ_GENERATION_PROMPT,
            &[
                ("content", "Photosynthesis"),
                ("num_questions", "5"),
                ("difficulty", "medium"),
                ("question_type", "mcq"),
                ("quiz_focus", "comprehensive"),
            ],
        );

        assert!(rendered.contains("Number of questions: 5"));
        assert!(rendered.ends_with("CONTENT:\nPhotosynthesis\n"));
        assert!(rendered.contains("\"correct_answer\": \"Option A\""));
    }

    #[test]
    fn quiz_content_with_braces_is_inserted_verbatim() {
        let rendered = render_template(
            QUIZ_GENERATION_PROMPT,
            &[
                ("content", "CSS rule: a {difficulty} b"),
                ("num_questions", "5"),
                ("difficulty", "medium"),
                ("question_type", "mcq"),
                ("quiz_focus", "comprehensive"),
            ],
        );

        assert!(rendered.ends_with("CONTENT:\nCSS rule: a {difficulty} b\n"));
        assert!(rendered.contains("medium"));
    }

    #[test]
    fn solver_questions_keep_their_own_placeholders() {
        let questions = "Explain `format!(\"{style}\")` and `{marks}`";
        let rendered = render_template(
            ASSIGNMENT_SOLVER_PROMPT,
            &[
                ("questions", questions),
                ("subject", "Rust"),
                ("marks", "5"),
                ("marks_instructions", "Answer in depth."),
                ("style", "academic"),
                ("style_note", "Formal tone."),
            ],
        );

        assert!(rendered.contains(questions));
    }

    #[test]
    fn render_template_inserts_values_without_rescanning() {
        let rendered = render_template("{a}-{b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(rendered, "{b}-x");
    }

    #[test]
    fn lab_prompt_uses_lowercase_language_for_fence() {
        let rendered = render_template(
            LAB_SOLVER_PROMPT,
            &[("language", "Python"), ("language_lower", "python")],
        );
        assert!(rendered.contains("```python code block"));
        assert!(rendered.contains("in Python."));
    }
}
