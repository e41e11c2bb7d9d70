use std::{
    borrow::Cow,
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use image::RgbImage;

use crate::{
    assets::{bundle::Bundle, decode::decode_member},
    foundation::core::{MemberRequest, Tier},
    foundation::error::{BearError, BearResult},
};

/// One tier that did not hold the requested member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierMiss {
    /// Tier that was checked.
    pub tier: Tier,
    /// Location that was looked up (file path or logical resource path).
    pub location: String,
}

impl fmt::Display for TierMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Image not found: {}", self.tier.label(), self.location)
    }
}

/// Every tier missed: one entry per tier, in lookup order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberMisses {
    /// The member that could not be found.
    pub request: MemberRequest,
    /// Per-tier misses, working dir first.
    pub misses: Vec<TierMiss>,
}

impl fmt::Display for MemberMisses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There's no {} found:", self.request.category.member_noun())?;
        for miss in &self.misses {
            write!(f, "\n{miss}")?;
        }
        Ok(())
    }
}

/// A decoded member and where it came from.
#[derive(Clone, Debug)]
pub struct FoundMember {
    /// Decoded raster, owned by the caller.
    pub image: RgbImage,
    /// Tier that satisfied the lookup.
    pub tier: Tier,
    /// Location the bytes were read from.
    pub location: String,
}

/// Outcome of a member lookup that did not fail fatally.
#[derive(Clone, Debug)]
pub enum Resolution {
    /// The first tier holding the member, decoded.
    Found(FoundMember),
    /// No tier holds the member.
    NotFound(MemberMisses),
}

impl Resolution {
    /// Collapse into a `Result`, keeping the misses as the error arm.
    pub fn into_result(self) -> Result<FoundMember, MemberMisses> {
        match self {
            Resolution::Found(found) => Ok(found),
            Resolution::NotFound(misses) => Err(misses),
        }
    }
}

enum TierLoad<'a> {
    Loaded(Cow<'a, [u8]>),
    Missing,
}

/// Finds member images by searching the working directory, then the configured base
/// directory, then the bundled resources.
///
/// Only "does not exist" falls through to the next tier. Any other IO failure, or bytes
/// that do not decode, abort the lookup with an error.
#[derive(Clone, Debug)]
pub struct MemberResolver {
    working_dir: PathBuf,
    base_dir: PathBuf,
    bundle: Arc<Bundle>,
}

impl MemberResolver {
    /// Build a resolver over explicit tier roots.
    pub fn new(
        working_dir: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
        bundle: impl Into<Arc<Bundle>>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            base_dir: base_dir.into(),
            bundle: bundle.into(),
        }
    }

    /// Where `member` would be looked up in `tier`.
    pub fn location(&self, tier: Tier, member: &MemberRequest) -> String {
        match tier {
            Tier::WorkingDir => member_file(&self.working_dir, member).display().to_string(),
            Tier::ConfiguredDir => member_file(&self.base_dir, member).display().to_string(),
            Tier::Bundled => Bundle::path_of(member),
        }
    }

    /// Look `member` up tier by tier, stopping at the first hit.
    #[tracing::instrument(skip(self, member), fields(member = %member))]
    pub fn resolve(&self, member: &MemberRequest) -> BearResult<Resolution> {
        let mut misses = Vec::with_capacity(Tier::ALL.len());
        for tier in Tier::ALL {
            let location = self.location(tier, member);
            match self.load(tier, member, &location)? {
                TierLoad::Loaded(bytes) => {
                    let image = decode_member(&bytes, &location)?;
                    tracing::debug!(%tier, %location, "member found");
                    return Ok(Resolution::Found(FoundMember {
                        image,
                        tier,
                        location,
                    }));
                }
                TierLoad::Missing => {
                    tracing::debug!(%tier, %location, "member missing");
                    misses.push(TierMiss { tier, location });
                }
            }
        }
        Ok(Resolution::NotFound(MemberMisses {
            request: member.clone(),
            misses,
        }))
    }

    fn load(
        &self,
        tier: Tier,
        member: &MemberRequest,
        location: &str,
    ) -> BearResult<TierLoad<'_>> {
        if !member.is_addressable() {
            return Ok(TierLoad::Missing);
        }
        match tier {
            Tier::WorkingDir => read_file(&member_file(&self.working_dir, member)),
            Tier::ConfiguredDir => read_file(&member_file(&self.base_dir, member)),
            Tier::Bundled => Ok(match self.bundle.get(location) {
                Some(bytes) => TierLoad::Loaded(Cow::Borrowed(bytes)),
                None => TierLoad::Missing,
            }),
        }
    }
}

fn member_file(root: &Path, member: &MemberRequest) -> PathBuf {
    root.join(member.category.dir_name()).join(member.file_name())
}

fn read_file(path: &Path) -> BearResult<TierLoad<'static>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(TierLoad::Loaded(Cow::Owned(bytes))),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Ok(TierLoad::Missing)
        }
        Err(source) => Err(BearError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
