//! CLI implementation for `dkpkg deploy`
//!
//! Uploads the merged manifest, the tags file and the primary version of
//! each named application through a [`MirrorFs`] rooted at `--dest`.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::config::PackageLayout;
use crate::core::deploy::{missing_locals, upload, DeployPlan, DeployReport};
use crate::infra::remote::MirrorFs;

/// Render the upload plan
pub fn render_plan<W: Write>(out: &mut W, plan: &DeployPlan, dest: &Path) -> io::Result<()> {
    writeln!(out, "{} Deploy plan (destination {}):", status::INFO, dest.display())?;
    for mapping in &plan.mappings {
        writeln!(out, "  {} -> {}", mapping.local.display(), mapping.remote)?;
    }
    Ok(())
}

/// Render the result of an upload
pub fn render_upload<W: Write>(out: &mut W, report: &DeployReport, dest: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{} Uploaded {} files to {} ({} directories created)",
        status::SUCCESS,
        report.files.len(),
        dest.display(),
        report.dirs_created
    )?;
    for skipped in &report.skipped {
        writeln!(out, "  {} skipped {}", status::WARNING, skipped.display())?;
    }
    Ok(())
}

/// Execute the deploy command
pub fn execute(
    layout: &PackageLayout,
    apps: &[String],
    dest: &Path,
    dry_run: bool,
    output: &OutputConfig,
) -> Result<()> {
    let plan = DeployPlan::for_apps(layout, apps);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for missing in missing_locals(&plan) {
        writeln!(
            out,
            "{} {} not found, run 'dkpkg package' first",
            status::WARNING,
            missing.display()
        )?;
    }

    if dry_run {
        render_plan(&mut out, &plan, dest)?;
        return Ok(());
    }

    let mut remote = MirrorFs::new(dest);
    let report = upload(&plan, &mut remote)
        .with_context(|| format!("Failed to deploy to {}", dest.display()))?;

    if !output.quiet {
        render_upload(&mut out, &report, dest)?;
    }
    out.flush()?;

    Ok(())
}
