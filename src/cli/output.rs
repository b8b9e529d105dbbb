use colored::*;
use std::path::PathBuf;

use crate::common::config::Layout;
use crate::packager::{Outcome, PackReport, Step, StepRecord};

/// Print the run banner
pub fn print_run_header(app_name: &str) {
    println!();
    println!("{}", rule());
    println!("POST-BUILD CLEANUP: {}", app_name.bold());
    println!("{}", rule());
}

/// Streams step records as `[TAG] message` lines, printing a section
/// marker whenever the run moves on to the next step. The completion
/// banner goes out as the launch step starts, before the app takes over.
#[derive(Debug)]
pub struct StepPrinter {
    last_step: Option<Step>,
    app_dir: PathBuf,
}

impl StepPrinter {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            last_step: None,
            app_dir: app_dir.into(),
        }
    }

    pub fn print(&mut self, record: &StepRecord) {
        for line in self.render(record) {
            println!("{}", line);
        }
    }

    /// Lines to print for `record`, section marker included
    pub fn render(&mut self, record: &StepRecord) -> Vec<String> {
        let mut lines = Vec::new();
        if self.last_step != Some(record.step) {
            self.section_lines(record.step, &mut lines);
            self.last_step = Some(record.step);
        }
        lines.push(format_record(record));
        lines
    }

    fn section_lines(&self, step: Step, lines: &mut Vec<String>) {
        match step {
            Step::Relocate => {}
            Step::Purge => {
                lines.push(String::new());
                lines.push(format!("{} Removing temporary directories...", "[CLEANUP]".cyan()));
            }
            Step::Copy => {
                lines.push(String::new());
                lines.push(format!("{} Copying additional files...", "[COPY]".cyan()));
            }
            Step::Launch => {
                lines.push(String::new());
                lines.push(rule());
                lines.push(format!(
                    "DONE! App location: {}",
                    self.app_dir.display().to_string().cyan()
                ));
                lines.push(rule());
            }
        }
    }
}

fn rule() -> String {
    "=".repeat(60).dimmed().to_string()
}

/// A record as a coloured `[TAG] message` line
pub fn format_record(record: &StepRecord) -> String {
    let tag = format!("[{}]", record.tag());
    let tag = match (&record.outcome, record.step) {
        (Outcome::Ok(_), Step::Launch) => tag.cyan().bold(),
        (Outcome::Ok(_), _) => tag.green(),
        (Outcome::Skipped(_), _) => tag.yellow(),
        (Outcome::Failed(_), _) => tag.red().bold(),
    };
    format!("{} {}", tag, record.message())
}

/// Print the step counts and timing for a finished run
pub fn print_run_footer(report: &PackReport) {
    if report.is_aborted() {
        return;
    }

    println!();
    println!(
        "  {} ok  •  {} skipped  •  {} failed  •  {:.2}s",
        report.ok_count().to_string().green(),
        report.skipped_count().to_string().yellow(),
        if report.failed_count() > 0 {
            report.failed_count().to_string().red().bold()
        } else {
            report.failed_count().to_string().normal()
        },
        report.duration_secs
    );
}

/// Print the full report as JSON
pub fn print_report_json(report: &PackReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}

/// One line: `<ok> <skipped> <failed>`
pub fn print_report_quiet(report: &PackReport) {
    println!(
        "{}  {}  {}",
        report.ok_count(),
        report.skipped_count(),
        report.failed_count()
    );
}

/// Show the directories a run would use
pub fn print_layout(layout: &Layout) {
    println!("  {}: {}", "root".dimmed(), layout.root.display());
    println!("  {}: {}", "workspace".dimmed(), layout.workspace.display());
    println!("  {}: {}", "build output".dimmed(), layout.dist_app_dir.display());
    println!("  {}: {}", "final folder".dimmed(), layout.final_app_dir.display());
}
