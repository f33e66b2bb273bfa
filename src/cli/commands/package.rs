//! CLI implementation for `dkpkg package`
//!
//! Runs the packaging pipeline and renders its report. At the summary level
//! only applications with a failing step are listed; the detailed level
//! walks every step. The failure list and merge errors are always shown.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig, Verbosity};
use crate::config::PackageLayout;
use crate::core::app;
use crate::core::pipeline::{self, AppOutcome, PackageReport, StepStatus};

fn marker(step: StepStatus) -> &'static str {
    if step.is_ok() {
        status::SUCCESS
    } else {
        status::ERROR
    }
}

fn write_app_summary<W: Write>(out: &mut W, app: &AppOutcome) -> io::Result<()> {
    if !app.has_failure() {
        return Ok(());
    }
    match app.app_info {
        Some(info) => writeln!(
            out,
            "{}: {} versions {} app info",
            app.name,
            marker(app.versions),
            marker(info)
        ),
        None => writeln!(out, "{}: {} versions", app.name, marker(app.versions)),
    }
}

fn write_app_detail<W: Write>(out: &mut W, app: &AppOutcome) -> io::Result<()> {
    writeln!(out, "{}:", app.name)?;
    for archive in &app.archives {
        writeln!(
            out,
            "  {} {} version {} -> {}",
            status::SUCCESS,
            if archive.primary { "primary" } else { "extra" },
            archive.source.display(),
            archive.archive.display()
        )?;
    }
    if !app.versions.is_ok() {
        writeln!(out, "  {} versions", status::ERROR)?;
    }
    match app.app_info {
        Some(info) => writeln!(out, "  {} app info", marker(info)),
        None => writeln!(out, "  {} app info not checked (excluded)", status::INFO),
    }
}

/// Render a packaging report
pub fn render_report<W: Write>(
    out: &mut W,
    report: &PackageReport,
    layout: &PackageLayout,
    verbosity: Verbosity,
    quiet: bool,
) -> io::Result<()> {
    for name in &report.unknown {
        writeln!(out, "{} No application directory for '{name}'", status::WARNING)?;
    }

    if let Some(icons) = &report.icons {
        if verbosity == Verbosity::Detailed {
            for name in &icons.copied {
                let icon = app::icon_file_name(name);
                writeln!(
                    out,
                    "{} Copied icon {} -> {}",
                    status::SUCCESS,
                    layout.app_dir(name).join(&icon).display(),
                    layout.icon_staging_dir.join(&icon).display()
                )?;
            }
        }
        match icons.archived {
            Some(entries) if verbosity == Verbosity::Detailed => writeln!(
                out,
                "{} Bundled {entries} icons into {}",
                status::SUCCESS,
                layout.icon_archive.display()
            )?,
            None if !quiet => writeln!(
                out,
                "{} No icons copied, skipping icon bundle",
                status::WARNING
            )?,
            _ => {}
        }
    }

    for app in &report.apps {
        match verbosity {
            Verbosity::Summary => write_app_summary(out, app)?,
            Verbosity::Detailed => write_app_detail(out, app)?,
        }
    }

    if !quiet {
        writeln!(out, "{} All applications processed", status::INFO)?;
    }

    if !report.failures.is_empty() {
        writeln!(out, "{} The following failed:", status::ERROR)?;
        for failure in report.failures.entries() {
            writeln!(out, "  - {failure}")?;
        }
    }

    let merged_path = layout.merged_manifest.display();
    match &report.merge {
        Ok(merge) => {
            if verbosity == Verbosity::Detailed {
                writeln!(out, "{} Generated {merged_path}", status::SUCCESS)?;
                writeln!(
                    out,
                    "  {} listed, {} merged, {} missing",
                    merge.total,
                    merge.merged.len(),
                    merge.missing.len()
                )?;
                for missing in &merge.missing {
                    writeln!(out, "  - {}: {}", missing.app, missing.reason)?;
                }
            } else if !merge.missing.is_empty() && !quiet {
                writeln!(
                    out,
                    "{} Missing from {merged_path}: {}",
                    status::WARNING,
                    merge.missing_names().join(", ")
                )?;
            }
        }
        Err(e) => writeln!(
            out,
            "{} Failed to generate {merged_path} ({}) - {e}",
            status::ERROR,
            e.failure_kind()
        )?,
    }

    Ok(())
}

/// Execute the package command
///
/// Per-application failures are reported but do not make the command fail;
/// only an unusable apps root or output directory does.
pub fn execute(
    layout: &PackageLayout,
    apps: &[String],
    debug: u8,
    output: &OutputConfig,
) -> Result<()> {
    let report = pipeline::run(layout, apps)
        .with_context(|| format!("Failed to package {}", layout.root.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(
        &mut out,
        &report,
        layout,
        Verbosity::from_level(debug),
        output.quiet,
    )?;
    out.flush()?;

    Ok(())
}
