// Copyright 2026 The oggz-arduino Developers

//! Upstream release tags.

use std::{cmp::Ordering, fmt};

/// A tag name as listed by the upstream repository.
///
/// Tags are opaque strings. They are only inspected to decide whether they
/// name a prerelease (see [`is_prerelease`](Self::is_prerelease)) and to
/// pick the newest tag (see [`latest_tag`]).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpstreamTag(String);

impl UpstreamTag {
    /// Creates a tag from its name.
    pub fn new(name: impl Into<String>) -> Self {
        UpstreamTag(name.into())
    }

    /// Returns the tag name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this tag looks like a beta or release candidate.
    ///
    /// The check is a case-insensitive substring match on `beta` and `rc`,
    /// so it also matches tags that merely contain those letters.
    pub fn is_prerelease(&self) -> bool {
        let lower = self.0.to_lowercase();
        lower.contains("beta") || lower.contains("rc")
    }

    /// Returns the key used to order tags by version.
    pub fn version_key(&self) -> TagVersionKey {
        TagVersionKey::parse(&self.0)
    }
}

impl fmt::Display for UpstreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UpstreamTag {
    fn from(name: String) -> Self {
        UpstreamTag(name)
    }
}

impl From<&str> for UpstreamTag {
    fn from(name: &str) -> Self {
        UpstreamTag(name.to_owned())
    }
}

impl AsRef<str> for UpstreamTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A version-ordering key derived from a tag name.
///
/// A single leading `v` is stripped, `-` is treated like `.`, and the
/// result is split on `.`. All-digit segments compare numerically, other
/// segments compare as strings, and a text segment always sorts below a
/// numeric one in the same position.
///
/// ```
/// use oggz_vendor::UpstreamTag;
///
/// let older = UpstreamTag::new("v1.9.3").version_key();
/// let newer = UpstreamTag::new("v1.10.0").version_key();
/// assert!(older < newer);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagVersionKey(Vec<TagSegment>);

// Variant order matters: the derived Ord puts Text below Numeric.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum TagSegment {
    Text(String),
    Numeric(u64),
}

impl TagVersionKey {
    fn parse(name: &str) -> Self {
        let name = name.strip_prefix('v').unwrap_or(name);
        let segments = name
            .split(['.', '-'])
            .map(|segment| {
                let all_digits = !segment.is_empty()
                    && segment.bytes().all(|b| b.is_ascii_digit());
                match segment.parse::<u64>() {
                    Ok(n) if all_digits => TagSegment::Numeric(n),
                    _ => TagSegment::Text(segment.to_owned()),
                }
            })
            .collect();
        TagVersionKey(segments)
    }
}

/// Returns the newest tag by [`TagVersionKey`], or `None` if there are no
/// tags.
///
/// If several tags share the greatest key, the first one in iteration
/// order wins.
pub fn latest_tag<'a, I>(tags: I) -> Option<&'a UpstreamTag>
where
    I: IntoIterator<Item = &'a UpstreamTag>,
{
    tags.into_iter()
        .map(|tag| (tag.version_key(), tag))
        .reduce(|best, candidate| match candidate.0.cmp(&best.0) {
            Ordering::Greater => candidate,
            Ordering::Less | Ordering::Equal => best,
        })
        .map(|(_, tag)| tag)
}
