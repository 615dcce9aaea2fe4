// Copyright 2026 The oggz-arduino Developers

use crate::{Fixture, git};
use anyhow::Result;
use oggz_vendor::UpstreamTag;
use oggz_vendor_vcs::{
    GitBackend, GitCommandError, ReplicationBackend, Replicator, RetryPolicy,
};
use std::time::Duration;

fn no_delay() -> RetryPolicy {
    RetryPolicy { attempts: 3, delay: Duration::ZERO }
}

fn names(tags: &[UpstreamTag]) -> Vec<&str> {
    tags.iter().map(UpstreamTag::as_str).collect()
}

#[test]
fn test_replicate_publishes_release_tags() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0", "1.1.0", "1.2.0-beta"])?;
    let backend = GitBackend::new(fixture.setup()?, "origin");
    let mut replicator = Replicator::new(backend).with_retry(no_delay());

    let report = replicator.run()?;
    assert_eq!(names(&report.published), ["1.0.0", "1.1.0"]);
    assert_eq!(names(&report.skipped_prerelease), ["1.2.0-beta"]);
    assert!(report.skipped_existing.is_empty());
    assert!(report.is_complete());

    assert_eq!(git(&fixture.remote, &["tag"])?, "1.0.0\n1.1.0");

    // Each tag carries the sources vendored from its upstream counterpart.
    for tag in ["1.0.0", "1.1.0"] {
        let contents = git(
            &fixture.remote,
            &["show", &format!("{tag}:src/oggz/liboggz/oggz.c")],
        )?;
        assert!(
            contents.starts_with(&format!("/* oggz {tag} */")),
            "tag {tag} has wrong oggz.c: {contents}"
        );
        assert!(contents.contains("#include \"oggz/oggz.h\""));
    }

    // Upstream clones are not committed.
    let files =
        git(&fixture.remote, &["ls-tree", "-r", "--name-only", "1.1.0"])?;
    assert!(!files.lines().any(|f| f.starts_with("original/")), "{files}");
    assert!(files.lines().any(|f| f == "src/ogg/config_types.h"), "{files}");

    Ok(())
}

#[test]
fn test_replicate_rerun_is_noop() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0", "1.1.0"])?;
    let backend = GitBackend::new(fixture.setup()?, "origin");
    Replicator::new(backend).with_retry(no_delay()).run()?;
    let head = git(&fixture.downstream, &["rev-parse", "HEAD"])?;

    let backend = GitBackend::new(fixture.setup()?, "origin");
    let report = Replicator::new(backend).with_retry(no_delay()).run()?;
    assert!(report.published.is_empty());
    assert_eq!(names(&report.skipped_existing), ["1.0.0", "1.1.0"]);
    assert_eq!(
        git(&fixture.downstream, &["rev-parse", "HEAD"])?,
        head,
        "no new commits on rerun"
    );
    Ok(())
}

#[test]
fn test_publish_is_idempotent() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0"])?;
    let backend = GitBackend::new(fixture.setup()?, "origin");
    let mut replicator = Replicator::new(backend).with_retry(no_delay());
    replicator.run()?;

    // A retry after a partial success must not trip over the existing
    // commit or tag.
    let mut backend = replicator.into_backend();
    let tag = UpstreamTag::new("1.0.0");
    backend.publish(&tag)?;
    backend.publish(&tag)?;

    assert_eq!(git(&fixture.remote, &["tag"])?, "1.0.0");
    Ok(())
}

#[test]
fn test_unreachable_remote_is_reported() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0", "1.1.0"])?;
    git(
        &fixture.downstream,
        &["remote", "add", "nowhere", "/nonexistent/oggz-remote.git"],
    )?;
    let backend = GitBackend::new(fixture.setup()?, "nowhere");
    assert_eq!(backend.remote(), "nowhere");
    let report = Replicator::new(backend).with_retry(no_delay()).run()?;

    assert!(report.published.is_empty());
    let failed: Vec<_> = report.failed.iter().map(|f| f.tag.as_str()).collect();
    assert_eq!(failed, ["1.0.0", "1.1.0"], "a failed push moves on");
    for failed in &report.failed {
        assert_eq!(failed.attempts, 3);
        assert!(
            matches!(failed.error, GitCommandError::Failed { .. }),
            "got {:?}",
            failed.error
        );
    }

    // Local tags are removed again, so nothing looks published.
    assert_eq!(git(&fixture.downstream, &["tag"])?, "");
    Ok(())
}

#[test]
fn test_failed_push_is_retried_next_run() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0", "1.1.0"])?;
    git(
        &fixture.downstream,
        &["remote", "add", "nowhere", "/nonexistent/oggz-remote.git"],
    )?;
    let backend = GitBackend::new(fixture.setup()?, "nowhere");
    let report = Replicator::new(backend).with_retry(no_delay()).run()?;
    assert_eq!(report.failed.len(), 2);

    let backend = GitBackend::new(fixture.setup()?, "origin");
    let report = Replicator::new(backend).with_retry(no_delay()).run()?;
    assert_eq!(names(&report.published), ["1.0.0", "1.1.0"]);
    assert!(report.skipped_existing.is_empty());
    assert!(report.is_complete());

    assert_eq!(git(&fixture.remote, &["tag"])?, "1.0.0\n1.1.0");
    for tag in ["1.0.0", "1.1.0"] {
        let contents = git(
            &fixture.remote,
            &["show", &format!("{tag}:src/oggz/liboggz/oggz.c")],
        )?;
        assert!(
            contents.starts_with(&format!("/* oggz {tag} */")),
            "tag {tag} has wrong oggz.c: {contents}"
        );
    }
    Ok(())
}
