use crate::evaluation::EvaluationReport;

pub(crate) fn export_report_impl(
    report: &EvaluationReport,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
