// Copyright 2026 The oggz-arduino Developers

//! Integration tests for oggz-vendor-vcs.
//!
//! These run real git against throwaway upstream, downstream and remote
//! repositories in a temporary directory.

use anyhow::{Result, ensure};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use oggz_vendor::ProjectLayout;
use oggz_vendor_vcs::{LibrarySetup, UpstreamUrls, Vcs};
use std::{fs, io::Write, process::Command};

mod replicate;
mod setup;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
fn git_command() -> Command {
    let bin = std::env::var("GIT").unwrap_or_else(|_| "git".to_string());
    Command::new(bin)
}

/// Runs git in `repo_root`, failing on a non-zero exit, and returns
/// trimmed stdout.
fn git(repo_root: &Utf8Path, args: &[&str]) -> Result<String> {
    let output = git_command().args(args).current_dir(repo_root).output()?;
    ensure!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr).trim(),
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Writes content to a file atomically, creating parent directories.
fn write_file(
    path: impl AsRef<Utf8Path>,
    content: impl AsRef<[u8]>,
) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(content.as_ref()))
        .map_err(|e| e.into())
}

/// Initializes a git repository and configures the user.
fn init_git_repo(repo_root: &Utf8Path) -> Result<()> {
    fs::create_dir_all(repo_root)?;
    git(repo_root, &["init", "--quiet"])?;
    git(repo_root, &["config", "user.email", "test@example.com"])?;
    git(repo_root, &["config", "user.name", "Test User"])?;
    Ok(())
}

/// Stages everything and commits it.
fn commit_all(repo_root: &Utf8Path, message: &str) -> Result<()> {
    git(repo_root, &["add", "-A"])?;
    git(repo_root, &["commit", "--quiet", "-m", message])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Repository setup helpers
// ---------------------------------------------------------------------------

/// Creates an upstream ogg repository with the usual autotools layout.
fn create_upstream_ogg(repo_root: &Utf8Path) -> Result<()> {
    init_git_repo(repo_root)?;
    write_file(
        repo_root.join("include/ogg/ogg.h"),
        "#include <ogg/os_types.h>\nint ogg_sync_init(void);\n",
    )?;
    write_file(
        repo_root.join("include/ogg/os_types.h"),
        "#include <ogg/config_types.h>\n",
    )?;
    write_file(
        repo_root.join("src/framing.c"),
        "#include \"ogg/ogg.h\"\n#include \"crctable.h\"\n",
    )?;
    write_file(repo_root.join("src/crctable.h"), "/* crc */\n")?;
    write_file(repo_root.join("configure.ac"), "AC_INIT\n")?;
    commit_all(repo_root, "Initial ogg")?;
    git(repo_root, &["tag", "v1.3.5"])?;
    Ok(())
}

/// Creates an upstream oggz repository with one commit per tag.
///
/// Each tagged revision of `src/liboggz/oggz.c` names its tag, so tests can
/// tell which revision was vendored.
fn create_upstream_oggz(repo_root: &Utf8Path, tags: &[&str]) -> Result<()> {
    init_git_repo(repo_root)?;
    write_file(
        repo_root.join("include/oggz/oggz.h"),
        "#include \"oggz/oggz_constants.h\"\n",
    )?;
    write_file(
        repo_root.join("include/oggz/oggz_constants.h"),
        "/* constants */\n",
    )?;
    write_file(
        repo_root.join("src/liboggz/oggz_private.h"),
        "#include \"config.h\"\n",
    )?;
    commit_all(repo_root, "Initial oggz")?;
    for tag in tags {
        write_file(
            repo_root.join("src/liboggz/oggz.c"),
            format!(
                "/* oggz {tag} */\n\
                 #include \"../include/oggz/oggz.h\"\n\
                 #include \"oggz_private.h\"\n"
            ),
        )?;
        commit_all(repo_root, &format!("Release {tag}"))?;
        git(repo_root, &["tag", tag])?;
    }
    Ok(())
}

/// A downstream project with a bare remote and two upstream repositories
/// to clone from.
struct Fixture {
    _temp: Utf8TempDir,
    downstream: Utf8PathBuf,
    remote: Utf8PathBuf,
    urls: UpstreamUrls,
}

impl Fixture {
    fn new(oggz_tags: &[&str]) -> Result<Self> {
        let temp = Utf8TempDir::with_prefix("oggz-vendor-vcs-")?;
        let root = temp.path();

        let ogg = root.join("ogg-upstream");
        let oggz = root.join("oggz-upstream");
        create_upstream_ogg(&ogg)?;
        create_upstream_oggz(&oggz, oggz_tags)?;

        let remote = root.join("remote.git");
        fs::create_dir_all(&remote)?;
        git(&remote, &["init", "--quiet", "--bare"])?;

        let downstream = root.join("oggz-arduino");
        init_git_repo(&downstream)?;
        write_file(downstream.join("library.properties"), "name=oggz\n")?;
        write_file(downstream.join(".gitignore"), "/original/\n")?;
        commit_all(&downstream, "Initial commit")?;
        git(&downstream, &["remote", "add", "origin", remote.as_str()])?;

        Ok(Fixture {
            downstream,
            remote,
            urls: UpstreamUrls { ogg: ogg.to_string(), oggz: oggz.to_string() },
            _temp: temp,
        })
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.downstream.clone())
    }

    fn setup(&self) -> Result<LibrarySetup> {
        Ok(LibrarySetup::new(self.layout(), Vcs::git()?, self.urls.clone()))
    }

    /// Reads a file below the downstream project root.
    fn read(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.downstream.join(relative))?)
    }
}
