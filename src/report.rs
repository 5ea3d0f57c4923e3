use quadlint::{FileReport, Report, Severity};
use serde_json::json;
use std::path::Path;

/// ANSI styling keyed by what is being printed rather than by color.
struct Palette {
    enabled: bool,
}

impl Palette {
    const RESET: &'static str = "\x1b[0m";

    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn style(&self, code: &str, s: impl AsRef<str>) -> String {
        if self.enabled { format!("{code}{}{}", s.as_ref(), Self::RESET) } else { s.as_ref().to_string() }
    }

    fn path(&self, s: impl AsRef<str>) -> String {
        self.style("\x1b[1m", s)
    }

    fn severity(&self, severity: Severity, s: impl AsRef<str>) -> String {
        match severity {
            Severity::Error => self.style("\x1b[31m", s),
            Severity::Warning => self.style("\x1b[33m", s),
        }
    }

    /// Counts: red or yellow when nonzero, green for a clean error count.
    fn tally(&self, severity: Severity, count: usize, s: impl AsRef<str>) -> String {
        match (severity, count) {
            (_, 1..) => self.severity(severity, s),
            (Severity::Error, 0) => self.style("\x1b[32m", s),
            (Severity::Warning, 0) => self.note(s),
        }
    }

    fn note(&self, s: impl AsRef<str>) -> String {
        self.style("\x1b[2m", s)
    }
}

/// `path:line:column: severity[category] message`, one line per finding.
pub fn print_text(report: &Report, color: bool) {
    let palette = Palette::new(color);

    for (path, file) in &report.files {
        print_file(path, file, &palette);
    }

    let summary = report.summary();
    let errors = format!("{} error(s)", summary.errors);
    let warnings = format!("{} warning(s)", summary.warnings);
    println!(
        "\n{}  {}  {}",
        palette.path(format!("{} file(s) checked:", report.files.len())),
        palette.tally(Severity::Error, summary.errors, errors),
        palette.tally(Severity::Warning, summary.warnings, warnings),
    );
    println!("{}", palette.note(format!("  elapsed {:?}", report.elapsed)));
}

fn print_file(path: &Path, file: &FileReport, palette: &Palette) {
    let path = path.display();
    for err in &file.parse_errors {
        println!(
            "{}:{}:{}: {} {}",
            palette.path(path.to_string()),
            err.line,
            err.column,
            palette.severity(Severity::Error, "error[syntax]"),
            err.kind
        );
    }
    for finding in &file.findings {
        println!(
            "{}:{}:{}: {} {} {}",
            palette.path(path.to_string()),
            finding.location.line,
            finding.location.column,
            palette.severity(finding.severity, format!("{}[{}]", finding.severity, finding.category)),
            finding.message,
            palette.note(format!("({})", finding.validator)),
        );
    }
}

pub fn print_json(report: &Report) -> serde_json::Result<()> {
    let files: Vec<serde_json::Value> = report
        .files
        .iter()
        .map(|(path, file)| {
            let parse_errors: Vec<serde_json::Value> = file
                .parse_errors
                .iter()
                .map(|e| {
                    json!({
                        "line": e.line,
                        "column": e.column,
                        "group": e.group,
                        "key": e.key,
                        "message": e.kind.to_string(),
                    })
                })
                .collect();
            json!({
                "path": path.display().to_string(),
                "parseErrors": parse_errors,
                "findings": file.findings,
            })
        })
        .collect();

    let out = json!({ "files": files, "summary": report.summary() });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_styles_by_severity() {
        let plain = Palette::new(false);
        assert_eq!(plain.severity(Severity::Error, "error[x]"), "error[x]");

        let color = Palette::new(true);
        assert_eq!(color.severity(Severity::Warning, "w"), "\x1b[33mw\x1b[0m");
        assert_eq!(color.tally(Severity::Error, 0, "0 error(s)"), "\x1b[32m0 error(s)\x1b[0m");
        assert_eq!(color.tally(Severity::Error, 2, "2 error(s)"), "\x1b[31m2 error(s)\x1b[0m");
        assert_eq!(color.tally(Severity::Warning, 0, "0"), "\x1b[2m0\x1b[0m");
    }
}
