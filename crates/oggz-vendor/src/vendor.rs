// Copyright 2026 The oggz-arduino Developers

//! Copying upstream sources into the vendored tree.

use crate::{
    VendorError,
    fsutil::{Depth, list_files},
    generated::{
        GeneratedOutcome, OGG_CONFIG_TYPES_H, OGGZ_CONFIG_H,
        OGGZ_OFF_T_GENERATED_H, always_regenerate, ensure_if_absent,
    },
};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Two upstream files that were flattened onto the same destination path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenCollision {
    /// The destination both files were copied to.
    pub dest: Utf8PathBuf,
    /// The upstream file that was overwritten.
    pub overwritten: Utf8PathBuf,
    /// The upstream file whose content ended up at `dest`.
    pub kept: Utf8PathBuf,
}

/// The result of vendoring one library.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VendorSummary {
    /// Number of upstream files copied.
    pub files_copied: usize,
    /// Destination paths written by more than one upstream file.
    pub collisions: Vec<FlattenCollision>,
    /// Generated headers, in the order they were handled.
    pub generated: Vec<GeneratedOutcome>,
}

/// Copies files into destination directories, remembering which upstream
/// file produced each destination path.
#[derive(Debug, Default)]
struct Copier {
    sources: HashMap<Utf8PathBuf, Utf8PathBuf>,
    summary: VendorSummary,
}

impl Copier {
    fn copy_into(
        &mut self,
        from: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> Result<(), VendorError> {
        // list_files only yields entries with a file name.
        let Some(file_name) = from.file_name() else {
            return Ok(());
        };
        let to = dest_dir.join(file_name);

        fs::copy(from, &to).map_err(|source| VendorError::Copy {
            from: from.to_owned(),
            to: to.clone(),
            source,
        })?;
        debug!("copied {from} -> {to}");

        if let Some(previous) = self.sources.insert(to.clone(), from.to_owned())
        {
            warn!(
                "{from} overwrote {previous} at {to} \
                 (upstream has two files with the same name)"
            );
            self.summary.collisions.push(FlattenCollision {
                dest: to,
                overwritten: previous,
                kept: from.to_owned(),
            });
        }
        self.summary.files_copied += 1;
        Ok(())
    }

    fn copy_all(
        &mut self,
        files: &[Utf8PathBuf],
        dest_dir: &Utf8Path,
    ) -> Result<(), VendorError> {
        for file in files {
            self.copy_into(file, dest_dir)?;
        }
        Ok(())
    }
}

fn create_dir(path: &Utf8Path) -> Result<(), VendorError> {
    fs::create_dir_all(path).map_err(|source| VendorError::CreateDir {
        path: path.to_owned(),
        source,
    })
}

fn dir_exists(path: &Utf8Path) -> Result<bool, VendorError> {
    path.try_exists()
        .map_err(|source| VendorError::Probe { path: path.to_owned(), source })
}

/// Vendors the ogg container library from `upstream` into `dest`.
///
/// Every `.h` below `upstream/include` is copied straight into `dest`,
/// discarding subdirectories, followed by every `.c` and `.h` directly in
/// `upstream/src`. Existing files are overwritten and nothing is pruned.
/// A missing `include` directory is tolerated; a missing `src` directory
/// is an error.
///
/// Afterwards, `config_types.h` is created if (and only if) it is missing;
/// an existing copy is left as is, even if it is stale.
pub fn vendor_ogg(
    upstream: &Utf8Path,
    dest: &Utf8Path,
) -> Result<VendorSummary, VendorError> {
    create_dir(dest)?;

    let include_dir = upstream.join("include");
    let headers = if dir_exists(&include_dir)? {
        list_files(&include_dir, Depth::Recursive, &["h"])?
    } else {
        debug!("{include_dir} does not exist, no public headers to copy");
        Vec::new()
    };
    let sources =
        list_files(&upstream.join("src"), Depth::Shallow, &["c", "h"])?;

    let mut copier = Copier::default();
    copier.copy_all(&headers, dest)?;
    copier.copy_all(&sources, dest)?;
    info!("Ogg files copied ({} files).", copier.summary.files_copied);

    let mut summary = copier.summary;
    summary.generated.push(ensure_if_absent(dest, &OGG_CONFIG_TYPES_H)?);
    Ok(summary)
}

/// Vendors the oggz codec-framing library from `upstream`.
///
/// Private implementation files (`.c` and `.h` directly in
/// `upstream/src/liboggz`) go to `private_dest`; public headers (`.h`
/// directly in `upstream/include/oggz`) go to `public_dest`. A missing
/// upstream directory is skipped.
///
/// `config.h` and `oggz_off_t_generated.h` are always rewritten in
/// `public_dest`.
pub fn vendor_oggz(
    upstream: &Utf8Path,
    public_dest: &Utf8Path,
    private_dest: &Utf8Path,
) -> Result<VendorSummary, VendorError> {
    create_dir(private_dest)?;
    create_dir(public_dest)?;

    let config = always_regenerate(public_dest, &OGGZ_CONFIG_H)?;

    let mut copier = Copier::default();
    let private_src = upstream.join("src").join("liboggz");
    if dir_exists(&private_src)? {
        let files = list_files(&private_src, Depth::Shallow, &["c", "h"])?;
        copier.copy_all(&files, private_dest)?;
    } else {
        debug!("{private_src} does not exist, skipping");
    }

    let public_src = upstream.join("include").join("oggz");
    if dir_exists(&public_src)? {
        let files = list_files(&public_src, Depth::Shallow, &["h"])?;
        copier.copy_all(&files, public_dest)?;
    } else {
        debug!("{public_src} does not exist, skipping");
    }
    info!("oggz files copied ({} files).", copier.summary.files_copied);

    let off_t = always_regenerate(public_dest, &OGGZ_OFF_T_GENERATED_H)?;

    let mut summary = copier.summary;
    summary.generated.push(config);
    summary.generated.push(off_t);
    Ok(summary)
}
