use crate::extractor::ApplicantInfo;
use crate::utils::{AnalyzerError, AnalyzerResult};

pub const CSV_HEADER: [&str; 10] = [
    "Applicant",
    "Role",
    "Seniority",
    "Status",
    "Current Position",
    "Current Company",
    "Years of Exp",
    "CV Link",
    "Skillset",
    "Remarks",
];

/// 生成汇总表：表头加每位候选人一行。
///
/// 含逗号、引号或换行的字段加引号，内部引号双写，行尾为 `\n`。
pub fn render_csv(applicants: &[ApplicantInfo]) -> AnalyzerResult<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for applicant in applicants {
        writer.write_record(applicant.columns())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyzerError::CsvError(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|e| {
        AnalyzerError::CsvError(std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    })
}
