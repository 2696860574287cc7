use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub fn insight(industry: &str) -> String {
    format!(
        r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{{
  "salaryRanges": [
    {{ "role": "string", "min": number, "max": number, "median": number, "location": "string" }}
  ],
  "growthRate": number,
  "demandLevel": "High" | "Medium" | "Low",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "Positive" | "Neutral" | "Negative",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}}

{JSON_ONLY_INSTRUCTION}
Include at least 5 common roles for salary ranges.
Growth rate should be a percentage float (e.g., 5.5).
Include at least 5 skills and trends."#
    )
}
