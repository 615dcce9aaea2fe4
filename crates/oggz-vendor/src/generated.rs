// Copyright 2026 The oggz-arduino Developers

//! Headers the Arduino build needs but upstream does not ship.

use crate::{VendorError, fsutil::write_atomic};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// A header file with fixed content, synthesized into a destination tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratedHeader {
    file_name: &'static str,
    contents: &'static str,
}

impl GeneratedHeader {
    /// Returns the file name the header is written under.
    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Returns the exact bytes written for this header.
    pub fn contents(&self) -> &'static str {
        self.contents
    }
}

/// Minimal `config_types.h` for ogg: fixed-width integer typedefs.
pub const OGG_CONFIG_TYPES_H: GeneratedHeader = GeneratedHeader {
    file_name: "config_types.h",
    contents: "\
// Auto-generated minimal config_types.h for Arduino build
#ifndef OGG_CONFIG_TYPES_H
#define OGG_CONFIG_TYPES_H

#include <stdint.h>

typedef int16_t ogg_int16_t;
typedef uint16_t ogg_uint16_t;
typedef int32_t ogg_int32_t;
typedef uint32_t ogg_uint32_t;
typedef int64_t ogg_int64_t;
typedef uint64_t ogg_uint64_t;

#endif // OGG_CONFIG_TYPES_H
",
};

/// Build configuration for oggz: reading and writing both enabled.
pub const OGGZ_CONFIG_H: GeneratedHeader = GeneratedHeader {
    file_name: "config.h",
    contents: "\
#pragma once

#define OGGZ_CONFIG_READ 1
#define OGGZ_CONFIG_WRITE 1
",
};

/// The `oggz_off_t` typedef and its printf format specifier.
pub const OGGZ_OFF_T_GENERATED_H: GeneratedHeader = GeneratedHeader {
    file_name: "oggz_off_t_generated.h",
    contents: "\
#ifndef __OGGZ_OFF_T_GENERATED_H__
#define __OGGZ_OFF_T_GENERATED_H__

#include <sys/types.h>
typedef long oggz_off_t;

#define PRI_OGGZ_OFF_T \"ll\"

#endif /* __OGGZ_OFF_T_GENERATED__ */
",
};

/// What happened to a generated header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedOutcome {
    /// The header did not exist and was created.
    Created(Utf8PathBuf),
    /// A file already existed and was left untouched.
    AlreadyPresent(Utf8PathBuf),
    /// The header was written, replacing any previous content.
    Written(Utf8PathBuf),
}

impl GeneratedOutcome {
    /// Returns the path of the header.
    pub fn path(&self) -> &Utf8Path {
        match self {
            GeneratedOutcome::Created(path)
            | GeneratedOutcome::AlreadyPresent(path)
            | GeneratedOutcome::Written(path) => path,
        }
    }
}

/// Writes `header` into `dir` only if no file of that name exists yet.
///
/// An existing file is never touched, even when its content differs from
/// `header`.
pub fn ensure_if_absent(
    dir: &Utf8Path,
    header: &GeneratedHeader,
) -> Result<GeneratedOutcome, VendorError> {
    let path = dir.join(header.file_name);
    let exists = path
        .try_exists()
        .map_err(|source| VendorError::Probe { path: path.clone(), source })?;
    if exists {
        debug!("{path} already present, not regenerating");
        return Ok(GeneratedOutcome::AlreadyPresent(path));
    }

    write_header(&path, header)?;
    info!("Created missing {path}.");
    Ok(GeneratedOutcome::Created(path))
}

/// Writes `header` into `dir`, replacing whatever is there.
pub fn always_regenerate(
    dir: &Utf8Path,
    header: &GeneratedHeader,
) -> Result<GeneratedOutcome, VendorError> {
    let path = dir.join(header.file_name);
    write_header(&path, header)?;
    info!("Generated {path}.");
    Ok(GeneratedOutcome::Written(path))
}

fn write_header(
    path: &Utf8Path,
    header: &GeneratedHeader,
) -> Result<(), VendorError> {
    write_atomic(path, header.contents.as_bytes()).map_err(|error| {
        VendorError::WriteGenerated { path: path.to_owned(), error }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use std::fs;

    #[test]
    fn test_config_types_has_six_typedefs() {
        let contents = OGG_CONFIG_TYPES_H.contents();
        let typedefs: Vec<_> =
            contents.lines().filter(|l| l.starts_with("typedef ")).collect();
        assert_eq!(
            typedefs,
            [
                "typedef int16_t ogg_int16_t;",
                "typedef uint16_t ogg_uint16_t;",
                "typedef int32_t ogg_int32_t;",
                "typedef uint32_t ogg_uint32_t;",
                "typedef int64_t ogg_int64_t;",
                "typedef uint64_t ogg_uint64_t;",
            ]
        );
        assert!(contents.contains("#ifndef OGG_CONFIG_TYPES_H\n"));
        assert!(contents.ends_with("#endif // OGG_CONFIG_TYPES_H\n"));
    }

    #[test]
    fn test_ensure_if_absent_creates_then_keeps() {
        let temp = Utf8TempDir::with_prefix("oggz-vendor-").unwrap();
        let dir = temp.path();

        let outcome = ensure_if_absent(dir, &OGG_CONFIG_TYPES_H).unwrap();
        let path = dir.join("config_types.h");
        assert_eq!(outcome, GeneratedOutcome::Created(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            OGG_CONFIG_TYPES_H.contents()
        );

        fs::write(&path, "stale\n").unwrap();
        let outcome = ensure_if_absent(dir, &OGG_CONFIG_TYPES_H).unwrap();
        assert_eq!(outcome, GeneratedOutcome::AlreadyPresent(path.clone()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "stale\n",
            "an existing header must not be overwritten"
        );
    }

    #[test]
    fn test_always_regenerate_overwrites() {
        let temp = Utf8TempDir::with_prefix("oggz-vendor-").unwrap();
        let dir = temp.path();
        let path = dir.join("config.h");
        fs::write(&path, "#define OGGZ_CONFIG_WRITE 0\n").unwrap();

        let outcome = always_regenerate(dir, &OGGZ_CONFIG_H).unwrap();
        assert_eq!(outcome.path(), path.as_path());
        assert_eq!(fs::read_to_string(&path).unwrap(), OGGZ_CONFIG_H.contents());
    }

    #[test]
    fn test_off_t_header_contents() {
        let contents = OGGZ_OFF_T_GENERATED_H.contents();
        assert!(contents.contains("typedef long oggz_off_t;\n"));
        assert!(contents.contains("#define PRI_OGGZ_OFF_T \"ll\"\n"));
    }
}
