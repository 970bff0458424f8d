//! Local clone commit source.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository, Sort};
use tracing::{debug, info};
use url::Url;

use super::{CommitInfo, CommitSource, FetchError, RepositoryInfo};

/// License display names keyed by a distinctive phrase from the license text.
const LICENSE_SIGNATURES: &[(&str, &str)] = &[
    ("apache license", "Apache License 2.0"),
    ("gnu affero general public license", "GNU Affero General Public License v3.0"),
    ("gnu lesser general public license", "GNU Lesser General Public License"),
    ("gnu general public license", "GNU General Public License v3.0"),
    ("mozilla public license", "Mozilla Public License 2.0"),
    ("mit license", "MIT License"),
    ("permission is hereby granted, free of charge", "MIT License"),
    ("bsd 3-clause", "BSD 3-Clause \"New\" or \"Revised\" License"),
    ("bsd 2-clause", "BSD 2-Clause \"Simplified\" License"),
    ("redistribution and use in source and binary forms", "BSD License"),
    ("this is free and unencumbered software", "The Unlicense"),
    ("isc license", "ISC License"),
];

/// Number of bytes of a license file inspected for its signature.
const LICENSE_HEADER_LEN: usize = 2048;

/// Commit source reading history from a repository on disk.
///
/// The repository is reopened for every fetch on a blocking thread, since
/// `git2::Repository` cannot be shared between threads.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    path: PathBuf,
}

impl LocalRepository {
    /// Opens the repository at `path`, failing early when it is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| {
            FetchError::LocalRepository(format!("{}: {}", path.display(), e.message()))
        })?;
        let root = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        debug!(path = %root.display(), "Opened local repository");
        Ok(Self { path: root })
    }

    fn repository(&self) -> Result<Repository> {
        Repository::open(&self.path).map_err(|e| {
            FetchError::LocalRepository(format!("{}: {}", self.path.display(), e.message())).into()
        })
    }

    /// Reads repository metadata synchronously.
    pub fn read_repository_info(&self) -> Result<RepositoryInfo> {
        let repo = self.repository()?;

        let origin_url = repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_string));

        let full_name = origin_url
            .as_deref()
            .and_then(owner_repo_from_remote)
            .unwrap_or_else(|| self.directory_name());

        let url = match origin_url.as_deref().and_then(web_url_from_remote) {
            Some(url) => url,
            None => Url::from_directory_path(&self.path)
                .map(String::from)
                .unwrap_or_else(|()| format!("file://{}", self.path.display())),
        };

        let info = RepositoryInfo {
            full_name,
            description: None,
            url,
            license_name: detect_license(&self.path),
            default_branch: default_branch(&repo),
        };
        info!(repository = %info.full_name, "Read local repository metadata");
        Ok(info)
    }

    /// Reads up to `max_commits` commits reachable from `HEAD`, newest first.
    pub fn read_commits(&self, max_commits: usize) -> Result<Vec<CommitInfo>> {
        let repo = self.repository()?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("Repository has no commits yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                let message = format!("Failed to resolve HEAD: {}", e.message());
                return Err(FetchError::LocalRepository(message).into());
            }
        };
        let head_commit = head
            .peel_to_commit()
            .context("Failed to peel HEAD to commit")?;

        let mut walker = repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TIME)
            .context("Failed to set revwalk sorting")?;
        walker
            .push(head_commit.id())
            .context("Failed to push HEAD commit")?;

        let mut commits = Vec::new();
        for oid in walker.take(max_commits) {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = match repo.find_commit(oid) {
                Ok(commit) => commit,
                Err(e) => {
                    debug!(%oid, error = %e, "Skipping unreadable commit");
                    continue;
                }
            };
            match CommitInfo::from_git_commit(&commit) {
                Ok(info) => commits.push(info),
                Err(e) => debug!(%oid, error = %e, "Skipping commit that could not be decoded"),
            }
        }

        info!(count = commits.len(), path = %self.path.display(), "Read local commits");
        Ok(commits)
    }

    fn directory_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string())
    }
}

impl CommitSource for LocalRepository {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_repository_info(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<RepositoryInfo>> + Send + '_>> {
        let this = self.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || this.read_repository_info())
                .await
                .context("Repository metadata task failed")?
        })
    }

    fn fetch_commits(
        &self,
        max_commits: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CommitInfo>>> + Send + '_>> {
        let this = self.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || this.read_commits(max_commits))
                .await
                .context("Commit history task failed")?
        })
    }
}

/// Extracts `owner/repo` from an SSH or HTTPS remote URL.
pub fn owner_repo_from_remote(uri: &str) -> Option<String> {
    let path = if let Some(rest) = uri.strip_prefix("git@") {
        rest.split_once(':')?.1
    } else {
        let parsed = Url::parse(uri).ok()?;
        if parsed.scheme() == "file" {
            return None;
        }
        return owner_repo_from_path(parsed.path());
    };
    owner_repo_from_path(path)
}

fn owner_repo_from_path(path: &str) -> Option<String> {
    let trimmed = path.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let mut segments = trimmed.rsplit('/');
    let repo = segments.next().filter(|s| !s.is_empty())?;
    let owner = segments.next().filter(|s| !s.is_empty())?;
    Some(format!("{owner}/{repo}"))
}

/// Converts a remote URL into a browsable `https://` URL.
pub fn web_url_from_remote(uri: &str) -> Option<String> {
    if let Some(rest) = uri.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        let name = owner_repo_from_path(path)?;
        return Some(format!("https://{host}/{name}"));
    }

    let parsed = Url::parse(uri).ok()?;
    let host = parsed.host_str()?;
    let name = owner_repo_from_path(parsed.path())?;
    match parsed.scheme() {
        "https" | "http" | "ssh" | "git" => Some(format!("https://{host}/{name}")),
        _ => None,
    }
}

fn default_branch(repo: &Repository) -> String {
    if let Ok(head) = repo.head() {
        if let Some(name) = head.shorthand() {
            return name.to_string();
        }
    }
    // Unborn HEAD still points at its intended branch
    repo.find_reference("HEAD")
        .ok()
        .and_then(|r| r.symbolic_target().map(str::to_string))
        .and_then(|target| target.strip_prefix("refs/heads/").map(str::to_string))
        .unwrap_or_else(|| "main".to_string())
}

/// Names the license from the first `LICENSE*` or `COPYING*` file in `root`.
pub fn detect_license(root: &Path) -> Option<String> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path.file_name().is_some_and(|name| {
                    let name = name.to_string_lossy().to_ascii_uppercase();
                    name.starts_with("LICENSE")
                        || name.starts_with("LICENCE")
                        || name.starts_with("COPYING")
                })
        })
        .collect();
    candidates.sort();

    candidates.iter().find_map(|path| {
        let bytes = fs::read(path).ok()?;
        let header = &bytes[..bytes.len().min(LICENSE_HEADER_LEN)];
        let text = String::from_utf8_lossy(header).to_lowercase();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        LICENSE_SIGNATURES
            .iter()
            .find(|(signature, _)| text.contains(signature))
            .map(|(_, name)| (*name).to_string())
    })
}
