use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const QUESTION_COUNT: usize = 10;

pub fn quiz(industry: &str, skills: &str) -> String {
    format!(
        r#"Generate {QUESTION_COUNT} technical interview questions for a {industry} professional with expertise in {skills}.
Each question must be multiple choice with 4 options.

Return the response in this JSON format:
{{
  "questions": [
    {{
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }}
  ]
}}

{JSON_ONLY_INSTRUCTION}"#
    )
}

/// `mistakes` holds one block per wrong answer.
pub fn improvement_tip(industry: &str, mistakes: &[String]) -> String {
    let mistakes = mistakes.join("\n\n");
    format!(
        r#"The user got the following {industry} technical interview questions wrong:
{mistakes}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on knowledge gaps. Keep it under 2 sentences. Encouraging tone."#
    )
}

pub fn mistake(question: &str, correct: &str, given: &str) -> String {
    format!("Question: \"{question}\"\nCorrect: \"{correct}\"\nUser Answer: \"{given}\"")
}
