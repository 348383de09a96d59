pub const NOT_AVAILABLE: &str = "N/A";
pub const SUMMARY_SUFFIX: &str = "_summary.txt";

/// 候选人结构化信息，缺失字段为 "N/A"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantInfo {
    pub name: String,
    pub role: String,
    pub seniority: String,
    pub status: String,
    pub current_position: String,
    pub current_company: String,
    pub years_of_exp: String,
    pub cv_link: String,
    pub skillset: String,
    pub remarks: String,
}

impl ApplicantInfo {
    /// 从模型的抽取结果构建，name 缺失时用摘要文件名代替
    pub fn from_response(response: &str, file_name: &str) -> Self {
        let mut applicant = Self {
            name: extract_field(response, "name"),
            role: extract_field(response, "role"),
            seniority: extract_field(response, "seniority"),
            status: extract_field(response, "status"),
            current_position: extract_field(response, "current_position"),
            current_company: extract_field(response, "current_company"),
            years_of_exp: extract_field(response, "years_of_exp"),
            cv_link: extract_field(response, "cv_link"),
            skillset: extract_field(response, "skillset"),
            remarks: extract_field(response, "remarks"),
        };

        if applicant.name == NOT_AVAILABLE || applicant.name.is_empty() {
            applicant.name = file_name
                .strip_suffix(SUMMARY_SUFFIX)
                .unwrap_or(file_name)
                .to_string();
        }

        applicant
    }

    pub fn columns(&self) -> [&str; 10] {
        [
            self.name.as_str(),
            self.role.as_str(),
            self.seniority.as_str(),
            self.status.as_str(),
            self.current_position.as_str(),
            self.current_company.as_str(),
            self.years_of_exp.as_str(),
            self.cv_link.as_str(),
            self.skillset.as_str(),
            self.remarks.as_str(),
        ]
    }
}

/// 按 `"key":` 查找字段值，取冒号后到行尾的内容。
///
/// 不是 JSON 解析：不识别嵌套、转义引号或多行值，值在第一个换行处截断。
/// 找不到键或冒号时返回 "N/A"；键的匹配忽略 ASCII 大小写。
pub fn extract_field(response: &str, field: &str) -> String {
    let haystack = response.to_ascii_lowercase();
    let needle = format!("\"{}\"", field.to_ascii_lowercase());

    let Some(start) = haystack.find(&needle) else {
        return NOT_AVAILABLE.to_string();
    };

    let Some(colon) = response[start..].find(':') else {
        return NOT_AVAILABLE.to_string();
    };
    let value_start = start + colon + 1;

    let rest = &response[value_start..];
    let value = match rest.find('\n') {
        Some(end) => &rest[..end],
        None => rest,
    };

    value
        .trim()
        .trim_matches(&['"', ','][..])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
  "name": "Alice Smith",
  "role": "Backend Engineer",
  "seniority": "Senior",
  "status": "Open to opportunities",
  "current_position": "Staff Engineer",
  "current_company": "Acme, Inc.",
  "years_of_exp": "8 years",
  "cv_link": "N/A",
  "skillset": "Golang, Python, AWS",
  "remarks": "Led a team of 5"
}"#;

    #[test]
    fn extract_field_strips_quotes_and_trailing_comma() {
        assert_eq!(extract_field(RESPONSE, "name"), "Alice Smith");
        assert_eq!(extract_field(RESPONSE, "current_company"), "Acme, Inc.");
        assert_eq!(extract_field(RESPONSE, "skillset"), "Golang, Python, AWS");
        assert_eq!(extract_field("\"name\": \"Alice Smith\",\n", "name"), "Alice Smith");
    }

    #[test]
    fn extract_field_returns_sentinel_when_key_missing() {
        assert_eq!(extract_field(RESPONSE, "email"), "N/A");
        assert_eq!(extract_field("", "name"), "N/A");
        // 不带引号的键不算
        assert_eq!(extract_field("name: Alice", "name"), "N/A");
    }

    #[test]
    fn extract_field_returns_sentinel_when_no_colon_follows() {
        assert_eq!(extract_field(r#"{"name" "Alice"}"#, "name"), "N/A");
    }

    #[test]
    fn extract_field_ignores_key_case() {
        let response = "{\n  \"Name\": \"Bob Lee\",\n  \"ROLE\": \"Designer\"\n}";
        assert_eq!(extract_field(response, "name"), "Bob Lee");
        assert_eq!(extract_field(response, "role"), "Designer");
        assert_eq!(extract_field(response, "NAME"), "Bob Lee");
    }

    #[test]
    fn extract_field_reads_to_end_without_newline() {
        assert_eq!(extract_field(r#"{"remarks": "last one"}"#, "remarks"), "last one\"}");
        assert_eq!(extract_field(r#""remarks": "last one""#, "remarks"), "last one");
    }

    #[test]
    fn extract_field_may_yield_empty_value() {
        assert_eq!(extract_field("\"name\": \"\",\n", "name"), "");
        assert_eq!(extract_field("\"name\":\n\"Alice\"", "name"), "");
    }

    #[test]
    fn extract_field_truncates_multiline_values() {
        let response = "\"remarks\": \"first line\nsecond line\",\n";
        assert_eq!(extract_field(response, "remarks"), "first line");
    }

    #[test]
    fn extract_field_takes_first_occurrence_of_key() {
        // "role" 先出现在 remarks 的值里
        let response = "{\n  \"remarks\": \"prefers \"role\": Tech Lead\",\n  \"role\": \"Engineer\"\n}";
        assert_eq!(extract_field(response, "role"), "Tech Lead");
    }

    #[test]
    fn from_response_fills_every_column() {
        let applicant = ApplicantInfo::from_response(RESPONSE, "alice_summary.txt");

        assert_eq!(
            applicant.columns(),
            [
                "Alice Smith",
                "Backend Engineer",
                "Senior",
                "Open to opportunities",
                "Staff Engineer",
                "Acme, Inc.",
                "8 years",
                "N/A",
                "Golang, Python, AWS",
                "Led a team of 5",
            ]
        );
    }

    #[test]
    fn from_response_falls_back_to_file_name() {
        let missing = ApplicantInfo::from_response("{\n  \"role\": \"Engineer\"\n}", "bob_summary.txt");
        assert_eq!(missing.name, "bob");
        assert_eq!(missing.role, "Engineer");
        assert_eq!(missing.status, "N/A");

        let sentinel = ApplicantInfo::from_response("\"name\": \"N/A\",\n", "carol_summary.txt");
        assert_eq!(sentinel.name, "carol");

        let empty = ApplicantInfo::from_response("\"name\": \"\",\n", "dave_summary.txt");
        assert_eq!(empty.name, "dave");
    }

    #[test]
    fn from_response_keeps_unrelated_file_name_intact() {
        let applicant = ApplicantInfo::from_response("no json here", "notes.txt");
        assert_eq!(applicant.name, "notes.txt");
    }
}
