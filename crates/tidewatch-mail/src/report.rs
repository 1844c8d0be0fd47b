//! HTML report rendering
//!
//! Builds the analysis report mail body from a batch of document reports,
//! and the minimal failure notification used when the whole pipeline gives
//! up. Plain string assembly with inline CSS; findings are HTML-escaped
//! since they quote provider output verbatim.

use chrono::Utc;

use tidewatch_domain::DocumentReport;

const REPORT_CSS: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; }\n\
        .header { background-color: #f0f0f0; padding: 15px; border-radius: 5px; }\n\
        .result { margin: 20px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }\n\
        .entity { margin: 15px 0; padding: 15px; background-color: #f8f9fa; border-left: 4px solid #007bff; border-radius: 3px; }\n\
        .entity-name { font-weight: bold; color: #007bff; font-size: 16px; margin-bottom: 8px; }\n\
        .entity-info { color: #333; line-height: 1.5; }\n\
        .error { color: #d32f2f; background-color: #ffebee; padding: 10px; border-radius: 3px; }\n\
        .summary { background-color: #e8f5e8; padding: 10px; border-radius: 3px; margin-top: 10px; }";

/// Subject line for the daily analysis report.
pub fn report_subject() -> String {
    format!("Statstidende-analyse {}", Utc::now().format("%Y-%m-%d"))
}

/// Subject line for the operator failure notification.
pub fn failure_subject() -> &'static str {
    "Statstidende-analyse fejlede"
}

/// Render the full HTML report for a batch of analyzed documents.
pub fn render_report(reports: &[DocumentReport]) -> String {
    let succeeded = reports.iter().filter(|r| !r.is_error()).count();
    let failed = reports.len() - succeeded;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>Statstidende-analyse</title>\n    <style>\n");
    html.push_str(REPORT_CSS);
    html.push_str("\n    </style>\n</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n        <h1>Statstidende-analyse</h1>\n");
    html.push_str(&format!(
        "        <p>Genereret {}</p>\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str(&format!(
        "        <p>{} dokument{} behandlet</p>\n    </div>\n",
        reports.len(),
        if reports.len() == 1 { "" } else { "er" }
    ));

    for report in reports {
        html.push_str("    <div class=\"result\">\n");
        html.push_str(&format!("        <h3>{}</h3>\n", escape_html(&report.source)));
        html.push_str(&format!(
            "        <p><strong>Mail:</strong> {} (fra {} den {})</p>\n",
            escape_html(&report.subject),
            escape_html(&report.from),
            report.date.format("%Y-%m-%d %H:%M")
        ));

        if let Some(error) = &report.error {
            html.push_str(&format!(
                "        <div class=\"error\"><strong>Fejl:</strong> {}</div>\n",
                escape_html(error)
            ));
        } else if let Some(analysis) = &report.analysis {
            for finding in analysis.results.findings() {
                let info = clean_entity_info(&finding.entity, &finding.info);
                html.push_str("        <div class=\"entity\">\n");
                html.push_str(&format!(
                    "            <div class=\"entity-name\">{}</div>\n",
                    escape_html(&finding.entity)
                ));
                html.push_str(&format!(
                    "            <div class=\"entity-info\">{}</div>\n",
                    escape_html(info).replace('\n', "<br>")
                ));
                html.push_str("        </div>\n");
            }
        }

        html.push_str("    </div>\n");
    }

    html.push_str("    <div class=\"summary\">\n        <h3>Opsummering</h3>\n");
    html.push_str(&format!(
        "        <p>Dokumenter i alt: {}</p>\n        <p>Vellykkede analyser: {}</p>\n        <p>Fejlede analyser: {}</p>\n",
        reports.len(),
        succeeded,
        failed
    ));
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}

/// Render the minimal failure notification body.
pub fn render_failure_notice(error_msg: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n\
         <title>Statstidende-analyse fejlede</title>\n    <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 20px; }}\n\
         .error {{ color: #d32f2f; background-color: #ffebee; padding: 15px; border-radius: 5px; }}\n\
         </style>\n</head>\n<body>\n    <h1>Statstidende-analyse fejlede</h1>\n\
         <div class=\"error\">\n        <strong>Tidspunkt:</strong> {}<br>\n\
         <strong>Fejl:</strong> {}\n    </div>\n</body>\n</html>\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        escape_html(error_msg)
    )
}

/// Remove a leading echo of the entity name from a finding, tolerating a
/// `:` or `-` separator. Findings normally arrive already cleaned; this
/// guards against provider answers that slipped through parsing verbatim.
fn clean_entity_info<'a>(entity: &str, info: &'a str) -> &'a str {
    let trimmed = info.trim();
    match trimmed.strip_prefix(entity) {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_prefix(':')
                .or_else(|| rest.strip_prefix('-'))
                .unwrap_or(rest)
                .trim()
        }
        None => trimmed,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
