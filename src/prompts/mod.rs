/// 简历摘要提示词，原文附在末尾
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Please provide a comprehensive summary of the following resume. Focus on extracting key information for recruitment purposes:

**Key Information to Extract:**
1. **Name**: Full name of the applicant
2. **Current Role/Position**: Current job title
3. **Current Company**: Current employer
4. **Years of Experience**: Total years of professional experience
5. **Seniority Level**: Assess as Junior/Mid/Senior/Lead/Manager/Director/VP/C-Level based on:
   - Years of experience
   - Scope of responsibilities
   - Team size managed
   - Technical complexity handled
   - Leadership indicators

**Technical Skills Assessment:**
Please specifically identify and highlight these skills if present:
- **Frontend**: TypeScript, JavaScript, React, Vue, Angular, Next.js
- **Backend**: Python, Golang
- **AI/ML**: AI, LLM, Machine Learning
- **Cloud**: AWS, GCP, Azure, Alibaba Cloud
- **DevOps**: Terraform, CI/CD, Docker, Kubernetes

**Additional Information:**
- **Status**: Active/Passive/Open to opportunities
- **Key Achievements**: Notable accomplishments
- **Education**: Relevant education background
- **Remarks**: Any special notes or observations

**Resume Content:**
{text}

Please provide a structured summary that captures all the above information clearly."
    )
}

/// 从摘要中抽取结构化字段，要求模型只输出 JSON
pub fn extraction_prompt(summary: &str) -> String {
    format!(
        r#"Extract the following information from this resume summary and return ONLY a JSON object with these exact keys (use "N/A" if not found):

{{
  "name": "Full Name",
  "role": "Job Role/Title",
  "seniority": "Junior/Mid/Senior/Lead/Manager/Director/VP/C-Level",
  "status": "Active/Passive/Open to opportunities",
  "current_position": "Current Job Title",
  "current_company": "Current Company Name",
  "years_of_exp": "X years",
  "cv_link": "N/A",
  "skillset": "Key skills separated by commas",
  "remarks": "Brief notes or observations"
}}

Resume Summary:
{summary}

JSON:"#
    )
}

/// 多份简历合并为一次提问，documents 为 (文件名, 文本)
pub fn query_prompt(question: &str, documents: &[(String, String)]) -> String {
    let rule = "=".repeat(50);
    let mut prompt = String::new();

    prompt.push_str("You are analyzing multiple resumes. Below are the extracted texts from ");
    prompt.push_str(&format!("{} resume files.\n\n", documents.len()));

    prompt.push_str("User Question: ");
    prompt.push_str(question);
    prompt.push_str("\n\n");

    prompt.push_str("Resume Texts:\n");
    prompt.push_str(&rule);
    prompt.push_str("\n\n");

    for (i, (file_name, text)) in documents.iter().enumerate() {
        prompt.push_str(&format!("--- Resume {}: {} ---\n", i + 1, file_name));
        prompt.push_str(text);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&rule);
    prompt.push_str("\n\n");
    prompt.push_str("Please provide a comprehensive answer to the user's question based on the resume texts above. ");
    prompt.push_str("If the question requires comparing candidates, please provide detailed analysis and comparisons. ");
    prompt.push_str("If the question asks for specific information, please extract and present it clearly.\n\n");
    prompt.push_str("Answer:");

    prompt
}
