use std::path::Path;
use std::time::Instant;

use super::copier;
use super::launcher::{launch_app, Launcher};
use super::purger;
use super::relocate;
use super::report::{PackReport, RunStatus, Step, StepRecord};
use crate::common::config::PackConfig;

/// Run the whole post-build procedure against a project root.
///
/// Order: relocate, purge, copy, launch. Only relocation can stop the run;
/// everything after it records its outcome and carries on. `on_step` sees
/// each record as soon as it is produced.
pub fn run(
    config: &PackConfig,
    root: &Path,
    launcher: &dyn Launcher,
    mut on_step: impl FnMut(&StepRecord),
) -> PackReport {
    let started = Instant::now();
    let layout = config.layout(root);
    let mut report = PackReport::new(&config.app_name, layout.final_app_dir.clone());

    let mut record = |report: &mut PackReport, r: StepRecord| {
        on_step(&r);
        report.records.push(r);
    };

    tracing::debug!(
        "Packaging {} from {}",
        config.app_name,
        layout.dist_app_dir.display()
    );

    // 1. Relocate
    let moved = relocate::relocate_build(&layout, &config.app_name, |r| record(&mut report, r));
    if let Err(e) = moved {
        tracing::warn!("Relocation failed: {}", e);
        record(
            &mut report,
            StepRecord::failed(Step::Relocate, &layout.dist_app_dir, e.to_string()),
        );
        report.status = RunStatus::Aborted;
        report.duration_secs = started.elapsed().as_secs_f64();
        return report;
    }

    // 2. Purge
    let purge_paths = config.purge_paths(&layout);
    purger::purge_temporaries(&purge_paths, &layout.root, &layout.final_app_dir, |r| {
        record(&mut report, r)
    });

    // 3. Copy
    copier::copy_manifest(&config.files, &layout.root, &layout.final_app_dir, |r| {
        record(&mut report, r)
    });

    // 4. Launch
    let launched = launch_app(
        &layout.final_app_dir,
        &config.executable_name(),
        config.launch,
        launcher,
    );
    record(&mut report, launched);

    report.duration_secs = started.elapsed().as_secs_f64();
    report
}
