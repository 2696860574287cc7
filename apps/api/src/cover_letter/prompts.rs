use crate::user::models::User;

pub fn cover_letter(user: &User, job_title: &str, company_name: &str, job_description: &str) -> String {
    let industry = user.industry_name().unwrap_or("Not specified");
    let experience = user
        .experience
        .map(|years| years.to_string())
        .unwrap_or_else(|| "Not specified".to_string());
    let skills = user.skills_list().unwrap_or_else(|| "Not specified".to_string());
    let background = user.bio.as_deref().unwrap_or("Not specified");

    format!(
        r#"Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Industry: {industry}
- Years of Experience: {experience}
- Skills: {skills}
- Professional Background: {background}

Job Description:
{job_description}

Requirements:
1. Use a professional, enthusiastic tone
2. Highlight relevant skills and experience
3. Show understanding of the company's needs
4. Keep it concise (max 400 words)
5. Use proper business letter formatting in markdown
6. Include specific examples of achievements
7. Relate candidate's background to job requirements

Format the letter in markdown. Do not include any preamble or postscript."#
    )
}
