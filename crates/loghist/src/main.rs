mod bootstrap;

use std::io::Write;

use anyhow::Result;
use loghist_core::formatting::{format_number, percentage};
use loghist_core::settings::Settings;
use loghist_data::analysis::{analyze_file, AnalysisResult};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("loghist v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, policy: {}, output: {}",
        settings.file.display(),
        settings.policy,
        settings.output
    );

    let policy = settings.malformed_policy()?;
    let result = analyze_file(&settings.file, policy, settings.print_data)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&settings, &result, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Write the analysis to `out` in the format selected by `settings`.
fn render<W: Write>(settings: &Settings, result: &AnalysisResult, out: &mut W) -> Result<()> {
    if settings.json_output() {
        let mut value = serde_json::to_value(&result.summary)?;
        if settings.print_data {
            let lines = result
                .aggregator
                .source()
                .retained_lines()
                .unwrap_or_default();
            value["lines"] = serde_json::to_value(lines)?;
        }
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    let summary = &result.summary;
    result.aggregator.write_hourly_counts(out)?;
    writeln!(out)?;
    writeln!(out, "Total accesses: {}", format_number(summary.total_accesses))?;
    writeln!(
        out,
        "Busiest hour: {} ({} accesses, {}%)",
        summary.busiest_hour,
        format_number(summary.hour_counts[summary.busiest_hour]),
        percentage(
            summary.hour_counts[summary.busiest_hour],
            summary.total_accesses,
            1
        )
    )?;
    writeln!(
        out,
        "Quietest hour: {} ({} accesses)",
        summary.quietest_hour,
        format_number(summary.hour_counts[summary.quietest_hour])
    )?;
    if summary.skipped_lines > 0 {
        writeln!(
            out,
            "Skipped malformed lines: {}",
            format_number(summary.skipped_lines)
        )?;
    }

    if settings.print_data {
        writeln!(out)?;
        result.aggregator.write_data(out)?;
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, lines: &[&str]) -> PathBuf {
        let path = dir.path().join("demo.log");
        std::fs::write(&path, lines.join("\n") + "\n").expect("write log");
        path
    }

    fn run(args: &[&str], path: &Path) -> String {
        let mut argv = vec!["loghist", "--file", path.to_str().unwrap()];
        argv.extend_from_slice(args);
        let settings = Settings::load_from_args(argv).expect("settings");
        let policy = settings.malformed_policy().expect("policy");
        let result = analyze_file(path, policy, settings.print_data).expect("analysis");
        let mut out = Vec::new();
        render(&settings, &result, &mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_render_text() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_log(
            &tmp,
            &["2015 06 01 14 00", "2015 06 01 14 30", "2015 06 01 02 00"],
        );

        let text = run(&[], &path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Hr: Count");
        assert_eq!(lines[15], "14: 2");
        assert!(text.contains("Total accesses: 3"));
        assert!(text.contains("Busiest hour: 14 (2 accesses, 66.7%)"));
        assert!(text.contains("Quietest hour: 0 (0 accesses)"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn test_render_text_with_data() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_log(&tmp, &["2015 06 01 14 00 200"]);

        let text = run(&["--print-data"], &path);
        assert!(text.ends_with("\n2015 06 01 14 00 200\n"));
    }

    #[test]
    fn test_render_text_reports_skipped() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_log(&tmp, &["2015 06 01 14 00", "garbage"]);

        let text = run(&["--policy", "skip"], &path);
        assert!(text.contains("Skipped malformed lines: 1"));
    }

    #[test]
    fn test_render_json() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_log(&tmp, &["2024-01-15 08:00:00", "2024-01-15 08:15:00"]);

        let text = run(&["--output", "json", "--print-data"], &path);
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["total_accesses"], 2);
        assert_eq!(value["busiest_hour"], 8);
        assert_eq!(value["lines"].as_array().expect("lines").len(), 2);
    }
}
