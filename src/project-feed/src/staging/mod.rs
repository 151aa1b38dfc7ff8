//! Version control staging of downloaded images.
//!
//! Images pulled from private repositories are stored under the site's
//! asset directory. When enabled, they are added and committed in the
//! repository hosting the site so the page can serve them.

mod error;

pub use error::StagingError;

use crate::preview::DownloadedImages;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, info_span, Instrument};

/// Commit message used for downloaded images.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add: Downloaded images from private repos";

/// What staging did with the downloaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Nothing was downloaded during the run.
    NoImages,

    /// The images were added but matched what was already committed.
    Unchanged { staged: usize },

    /// A commit was created.
    Committed { staged: usize },
}

/// Adds and commits the downloaded images in the repository at `repo_root`.
///
/// Only the image paths are committed; anything else already in the index
/// is left staged.
///
/// # Errors
///
/// Returns [`StagingError`] if git can't be run or a git command fails.
pub async fn stage_images(
    repo_root: &Path,
    images: &DownloadedImages,
    message: &str,
) -> Result<StageOutcome, StagingError> {
    if images.is_empty() {
        debug!("No downloaded images to stage");
        return Ok(StageOutcome::NoImages);
    }

    let span = info_span!("stage_images", count = images.len());

    async {
        let paths: Vec<OsString> = images
            .iter()
            .map(|path| relative_to(repo_root, path))
            .collect();

        run_git(repo_root, &["add", "--"], &paths).await?;

        let staged = run_git(repo_root, &["diff", "--cached", "--name-only", "--"], &paths).await?;
        let staged = staged.lines().filter(|l| !l.trim().is_empty()).count();
        if staged == 0 {
            info!("Downloaded images are already committed");
            return Ok(StageOutcome::Unchanged {
                staged: images.len(),
            });
        }

        run_git(repo_root, &["commit", "-m", message, "--"], &paths).await?;
        info!(files = staged, "Committed downloaded images");

        Ok(StageOutcome::Committed { staged })
    }
    .instrument(span)
    .await
}

/// Rewrites `path` relative to `root`, where git runs.
///
/// Stored image paths include the site root, so passing them unchanged would
/// resolve them twice when the root is relative.
fn relative_to(root: &Path, path: &Path) -> OsString {
    path.strip_prefix(root)
        .unwrap_or(path)
        .as_os_str()
        .to_owned()
}

/// Runs a git command with trailing path arguments, returning stdout.
async fn run_git(
    path: &Path,
    args: &[&str],
    paths: &[OsString],
) -> Result<String, StagingError> {
    let command = args.first().copied().unwrap_or_default().to_string();

    let output = Command::new("git")
        .args(args)
        .args(paths)
        .current_dir(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| StagingError::SpawnFailed {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(StagingError::GitFailed { command, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
