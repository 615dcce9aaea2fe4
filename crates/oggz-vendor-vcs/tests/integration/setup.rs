// Copyright 2026 The oggz-arduino Developers

use crate::{Fixture, git, write_file};
use anyhow::Result;
use oggz_vendor::{GeneratedOutcome, OGG_CONFIG_TYPES_H, OGGZ_CONFIG_H};
use oggz_vendor_vcs::CodecRevision;

#[test]
fn test_setup_vendors_latest_tag() -> Result<()> {
    // Refname order puts 1.10.0 first; version order must pick it anyway.
    let fixture = Fixture::new(&["1.9.0", "1.10.0"])?;
    let layout = fixture.layout();
    let report = fixture.setup()?.run(CodecRevision::Latest)?;

    assert_eq!(report.oggz_tag.as_ref().map(|t| t.as_str()), Some("1.10.0"));
    assert_eq!(
        git(&layout.oggz_upstream(), &["describe", "--tags", "--exact-match"])?,
        "1.10.0"
    );

    // ogg is flattened into src/ogg.
    assert_eq!(report.ogg.files_copied, 4);
    for file in ["ogg.h", "os_types.h", "framing.c", "crctable.h"] {
        assert!(
            layout.ogg_dest().join(file).is_file(),
            "src/ogg/{file} should exist"
        );
    }
    assert_eq!(
        fixture.read("src/ogg/config_types.h")?,
        OGG_CONFIG_TYPES_H.contents()
    );
    assert!(!layout.ogg_dest().join("configure.ac").exists());

    // oggz public headers and private sources are kept apart.
    assert_eq!(report.oggz.files_copied, 4);
    assert!(layout.oggz_dest().join("oggz.h").is_file());
    assert!(layout.liboggz_dest().join("oggz_private.h").is_file());
    assert_eq!(fixture.read("src/oggz/config.h")?, OGGZ_CONFIG_H.contents());
    assert!(layout.oggz_dest().join("oggz_off_t_generated.h").is_file());

    // Includes that no longer resolve are rewritten relative to src/.
    let oggz_c = fixture.read("src/oggz/liboggz/oggz.c")?;
    assert_eq!(
        oggz_c,
        "/* oggz 1.10.0 */\n\
         #include \"oggz/oggz.h\"\n\
         #include \"oggz_private.h\"\n"
    );
    assert_eq!(
        fixture.read("src/oggz/liboggz/oggz_private.h")?,
        "#include \"oggz/config.h\"\n"
    );
    // Includes that already resolve are untouched.
    assert_eq!(
        fixture.read("src/ogg/framing.c")?,
        "#include \"ogg/ogg.h\"\n#include \"crctable.h\"\n"
    );
    assert_eq!(report.patch.includes_rewritten, 2);
    assert_eq!(report.patch.files_rewritten, 2);
    assert!(report.header_collisions.is_empty());

    Ok(())
}

#[test]
fn test_setup_rerun_keeps_config_types() -> Result<()> {
    let fixture = Fixture::new(&["1.0.0"])?;
    let setup = fixture.setup()?;
    setup.run(CodecRevision::Latest)?;

    let custom = "/* hand-tuned */\n";
    write_file(setup.layout().ogg_dest().join("config_types.h"), custom)?;
    write_file(setup.layout().oggz_dest().join("config.h"), custom)?;

    let report = setup.run(CodecRevision::CheckedOut)?;
    assert_eq!(report.oggz_tag, None);
    assert_eq!(fixture.read("src/ogg/config_types.h")?, custom);
    assert!(matches!(
        report.ogg.generated.as_slice(),
        [GeneratedOutcome::AlreadyPresent(_)]
    ));
    // config.h, unlike config_types.h, is regenerated every run.
    assert_eq!(fixture.read("src/oggz/config.h")?, OGGZ_CONFIG_H.contents());

    // Fresh copies from upstream need their includes patched again.
    assert_eq!(report.patch.includes_rewritten, 2);
    Ok(())
}

#[test]
fn test_setup_without_tags_uses_checkout() -> Result<()> {
    let fixture = Fixture::new(&[])?;

    let report = fixture.setup()?.run(CodecRevision::Latest)?;
    assert_eq!(report.oggz_tag, None);
    let layout = fixture.layout();
    assert!(layout.oggz_dest().join("oggz.h").is_file());
    assert!(!layout.liboggz_dest().join("oggz.c").exists());
    Ok(())
}
