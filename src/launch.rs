// Archive launch module
//
// Hands a finished .mcpack archive to the OS default handler; the Bedrock
// client registers itself for the extension and imports the pack on open.

use anyhow::{Context, Result};
use camino::Utf8Path;

/// Seam for opening a generated archive.
///
/// The pipeline itself never launches anything; the front end decides whether
/// a run ends with a launch, and tests swap in [`NoopLauncher`].
pub trait Launcher {
    fn launch(&self, archive: &Utf8Path) -> Result<()>;
}

/// Opens the archive with the system default handler.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, archive: &Utf8Path) -> Result<()> {
        open::that(archive.as_std_path())
            .with_context(|| format!("Failed to open {} with the system handler", archive))?;
        tracing::info!("Handed {} to the system handler", archive);
        Ok(())
    }
}

/// Launcher that only records the request.
///
/// Used for headless runs (`--no-open`) and in tests.
#[derive(Debug, Default)]
pub struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn launch(&self, archive: &Utf8Path) -> Result<()> {
        tracing::debug!("Skipping launch of {}", archive);
        Ok(())
    }
}
