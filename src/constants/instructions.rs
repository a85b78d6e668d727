//! Instruction snippets selected by request options and spliced into prompts.

pub fn marks_instructions(marks: &str) -> &'static str {
    match marks.trim() {
        "1" => "**1 MARK QUESTIONS:**\n- One sentence per answer at most\n- Direct, concise answers only",
        "2" => "**2 MARK QUESTIONS:**\n- 3-4 sentences or 4-5 bullet points per question\n- Definition plus 2-3 key points (about 50-80 words)",
        "3" => "**3 MARK QUESTIONS:**\n- 5-7 sentences or 6-8 bullet points per question\n- Definition, explanation and an example (about 100-150 words)",
        "4" => "**4 MARK QUESTIONS:**\n- 8-12 sentences or 10-15 bullet points per question\n- Detailed explanation, several examples and a comparison (about 200-300 words)",
        "5" => "**5 MARK QUESTIONS (COMPREHENSIVE):**\n- Skip MCQs and 1-mark questions; answer only long-form questions\n- 15-20 sentences or 20-25 bullet points per question\n- Essay-style: explanation, examples, diagrams, applications and a conclusion (about 400-600 words)",
        _ => "",
    }
}

pub fn assignment_style_note(style: &str) -> &'static str {
    match style {
        "simple" => "\n\n**STYLE NOTE**: Explain simply, with plain language and analogies. Avoid heavy jargon.",
        "bullet_points" => "\n\n**STYLE NOTE**: Prefer bullet points and structured lists over long paragraphs.",
        _ => "",
    }
}

pub fn lab_style_instructions(style: &str) -> &'static str {
    match style {
        "detailed" => "- Explain every step thoroughly.\n- Include a \"Why this approach?\" section.\n- Comment each block of code.",
        "concise" => "- Keep explanations brief.\n- Focus on the logic and the code.\n- Comment only where necessary.",
        "code_only" => "- PROVIDE ONLY THE CODE AND SAMPLE OUTPUT.\n- No theoretical explanations.\n- Minimal comments.",
        _ => "",
    }
}

pub fn persona_instructions(persona: &str) -> &'static str {
    match persona {
        "socratic" => "You are a Socratic tutor. Do not give the answer directly; ask guiding questions that lead the student to derive it.",
        "direct" => "You are a strict, no-nonsense professor. Be precise and concise. No fluff, no emojis.",
        "analogy" => "You are an analogy master. Explain every complex idea through a simple real-world analogy.",
        _ => "You are a warm, encouraging and patient tutor. Praise progress and explain things simply.",
    }
}

pub fn difficulty_instructions(difficulty: &str) -> &'static str {
    match difficulty {
        "easy" => "Explain like I'm 5. Very simple language, no jargon.",
        "hard" => "Graduate-level depth. Cover theory, exceptions and nuance.",
        _ => "High-school to college level. Balance depth and simplicity.",
    }
}

pub fn study_mode_instructions(study_mode: &str) -> &'static str {
    match study_mode {
        "quick" => "Keep answers short and bulleted; the student is cramming.",
        "deep" => "Give a comprehensive deep-dive with history, context and related concepts.",
        _ => "Give a standard explanation with one or two examples.",
    }
}
