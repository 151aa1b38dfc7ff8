//! Preview image resolution.
//!
//! Each selected repository gets one image, taken from the first source in
//! the chain that produces one:
//!
//! 1. [`PreviewSource::Readme`] - first content image of the README
//! 2. [`PreviewSource::SocialPreview`] - custom social preview uploaded to GitHub
//! 3. [`PreviewSource::OwnerAvatar`] - avatar of the owning user or organization
//! 4. [`PreviewSource::Placeholder`] - static image shipped with the site
//!
//! Errors never escape a source; they are logged and the next one is tried.

mod assets;
mod readme;

pub use assets::{local_file_name, AssetError, AssetStore, DownloadedImages};
pub use readme::{find_readme_image, ReadmeImage};

use crate::host::RepositoryHost;
use crate::listing::RepositorySummary;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

/// Base URL of raw repository content.
const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com/";

/// Hosts serving custom social previews.
const SOCIAL_PREVIEW_HOSTS: [&str; 2] = [
    "opengraph.githubassets.com",
    "repository-images.githubusercontent.com",
];

/// Where a preview image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewSource {
    /// Image embedded in the README.
    Readme,

    /// Social preview generated or uploaded on GitHub.
    SocialPreview,

    /// Avatar of the repository owner.
    OwnerAvatar,

    /// Static placeholder image.
    Placeholder,
}

impl PreviewSource {
    /// Returns the source as a string for logs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readme => "readme",
            Self::SocialPreview => "social_preview",
            Self::OwnerAvatar => "owner_avatar",
            Self::Placeholder => "placeholder",
        }
    }
}

/// Sources tried before falling back to the placeholder.
pub const DEFAULT_CHAIN: [PreviewSource; 3] = [
    PreviewSource::Readme,
    PreviewSource::SocialPreview,
    PreviewSource::OwnerAvatar,
];

/// The image chosen for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// Source that produced the image.
    pub source: PreviewSource,

    /// URL or site-absolute path used as the `src` attribute.
    pub src: String,

    /// Whether the image was stored locally during this run.
    pub is_downloaded: bool,
}

impl PreviewImage {
    fn remote(source: PreviewSource, src: String) -> Self {
        Self {
            source,
            src,
            is_downloaded: false,
        }
    }
}

/// Resolves preview images through an ordered chain of sources.
pub struct PreviewResolver<'a> {
    host: &'a dyn RepositoryHost,
    assets: AssetStore,
    placeholder: String,
    chain: Vec<PreviewSource>,
}

impl<'a> PreviewResolver<'a> {
    /// Creates a resolver using [`DEFAULT_CHAIN`].
    pub fn new(host: &'a dyn RepositoryHost, assets: AssetStore, placeholder: String) -> Self {
        Self {
            host,
            assets,
            placeholder,
            chain: DEFAULT_CHAIN.to_vec(),
        }
    }

    /// Replaces the chain. The placeholder is always the final fallback.
    #[must_use]
    pub fn with_chain(mut self, chain: Vec<PreviewSource>) -> Self {
        self.chain = chain;
        self
    }

    /// Resolves the preview image of a repository.
    ///
    /// Images downloaded (or found already downloaded) are recorded in `downloads`.
    pub async fn resolve(
        &self,
        repository: &RepositorySummary,
        downloads: &mut DownloadedImages,
    ) -> PreviewImage {
        let span = info_span!("resolve_preview", repo = %repository.full_name);

        async {
            for &source in &self.chain {
                if let Some(image) = self.attempt(source, repository, downloads).await {
                    info!(source = source.as_str(), src = %image.src, "Using preview image");
                    return image;
                }
                debug!(source = source.as_str(), "Preview source produced nothing");
            }

            info!("Using placeholder image");
            self.placeholder_image()
        }
        .instrument(span)
        .await
    }

    async fn attempt(
        &self,
        source: PreviewSource,
        repository: &RepositorySummary,
        downloads: &mut DownloadedImages,
    ) -> Option<PreviewImage> {
        match source {
            PreviewSource::Readme => self.from_readme(repository, downloads).await,
            PreviewSource::SocialPreview => self.from_social_preview(repository).await,
            PreviewSource::OwnerAvatar => from_owner_avatar(repository),
            PreviewSource::Placeholder => Some(self.placeholder_image()),
        }
    }

    fn placeholder_image(&self) -> PreviewImage {
        PreviewImage::remote(PreviewSource::Placeholder, self.placeholder.clone())
    }

    async fn from_readme(
        &self,
        repository: &RepositorySummary,
        downloads: &mut DownloadedImages,
    ) -> Option<PreviewImage> {
        let readme = match self.host.readme(repository).await {
            Ok(Some(readme)) => readme,
            Ok(None) => return None,
            Err(e) => {
                warn!(repo = %repository.full_name, error = %e, "Failed to fetch README");
                return None;
            }
        };

        match find_readme_image(&readme)? {
            ReadmeImage::Absolute(url) => Some(PreviewImage::remote(PreviewSource::Readme, url)),
            ReadmeImage::RepositoryPath(path) => {
                let raw_url = raw_content_url(repository, &path)?;
                if !repository.is_private {
                    return Some(PreviewImage::remote(PreviewSource::Readme, raw_url));
                }
                self.localize(repository, &path, &raw_url, downloads).await
            }
        }
    }

    /// Stores a private repository image locally, since its raw URL needs a token.
    async fn localize(
        &self,
        repository: &RepositorySummary,
        path: &str,
        raw_url: &str,
        downloads: &mut DownloadedImages,
    ) -> Option<PreviewImage> {
        let file_name = local_file_name(repository, path);
        let local_path = self.assets.local_path(&file_name);
        let local = PreviewImage {
            source: PreviewSource::Readme,
            src: self.assets.public_src(&file_name),
            is_downloaded: true,
        };

        if local_path.exists() {
            debug!(path = %local_path.display(), "Reusing downloaded image");
            downloads.insert(local_path);
            return Some(local);
        }

        let bytes = match self.host.download(raw_url).await {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => {
                warn!(repo = %repository.full_name, url = raw_url, "Downloaded image is empty");
                return None;
            }
            Err(e) => {
                warn!(repo = %repository.full_name, url = raw_url, error = %e, "Failed to download image");
                return None;
            }
        };

        match self.assets.store(&file_name, &bytes) {
            Ok(stored) => {
                info!(path = %stored.display(), "Downloaded image");
                downloads.insert(stored);
                Some(local)
            }
            Err(e) => {
                warn!(repo = %repository.full_name, error = %e, "Failed to store image");
                None
            }
        }
    }

    async fn from_social_preview(&self, repository: &RepositorySummary) -> Option<PreviewImage> {
        match self.host.social_preview(repository).await {
            Ok(Some(url)) if is_custom_social_preview(&url) => {
                Some(PreviewImage::remote(PreviewSource::SocialPreview, url))
            }
            Ok(_) => None,
            Err(e) => {
                debug!(repo = %repository.full_name, error = %e, "Social preview unavailable");
                None
            }
        }
    }
}

fn from_owner_avatar(repository: &RepositorySummary) -> Option<PreviewImage> {
    repository
        .owner_avatar_url
        .clone()
        .map(|url| PreviewImage::remote(PreviewSource::OwnerAvatar, url))
}

/// Returns true if the URL points at a social preview rather than an avatar.
#[must_use]
pub fn is_custom_social_preview(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .is_some_and(|host| SOCIAL_PREVIEW_HOSTS.contains(&host.as_str()))
}

/// Builds the raw content URL of a file on the repository's default branch.
#[must_use]
pub fn raw_content_url(repository: &RepositorySummary, path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let mut url = Url::parse(RAW_CONTENT_BASE).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend([repository.owner.as_str(), repository.name.as_str()])
        // Branch names like `release/v1` span several path segments.
        .extend(
            repository
                .default_branch
                .split('/')
                .filter(|segment| !segment.is_empty()),
        )
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Some(url.to_string())
}
