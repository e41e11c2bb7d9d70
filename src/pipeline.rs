use image::RgbImage;

use crate::{
    assets::decode::{DEFAULT_JPEG_QUALITY, encode_jpeg},
    assets::resolver::{MemberMisses, MemberResolver, Resolution},
    foundation::core::{BearRequest, Tier},
    foundation::error::BearResult,
    render::composite::compose,
};

/// First line of every missing-member report.
pub const MISSING_HEADER: &str = "Couldn't create bear:";

/// A bear that was assembled and encoded.
#[derive(Clone, Debug)]
pub struct ComposedBear {
    /// JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Tier each member came from: head, body, leg.
    pub tiers: [Tier; 3],
}

/// Non-fatal result of building one bear.
#[derive(Clone, Debug)]
pub enum BearOutcome {
    /// All members found; image composed and encoded.
    Composed(ComposedBear),
    /// The first member that could not be found.
    Missing(MemberMisses),
}

/// Members resolved and stacked, before encoding.
#[derive(Clone, Debug)]
pub enum Assembled {
    /// Head, body and leg stacked into one raster.
    Stacked {
        /// The composed raster.
        image: RgbImage,
        /// Tier each member came from: head, body, leg.
        tiers: [Tier; 3],
    },
    /// The first member that could not be found.
    Missing(MemberMisses),
}

/// Render the plain-text report for a missing member.
pub fn missing_report(misses: &MemberMisses) -> String {
    format!("{MISSING_HEADER}\n{misses}")
}

/// Resolve, stack and encode a bear.
///
/// Members are resolved head, body, leg; the first miss ends the request without looking
/// at the remaining members.
#[derive(Clone, Debug)]
pub struct BearPipeline {
    resolver: MemberResolver,
    jpeg_quality: u8,
}

impl BearPipeline {
    /// Pipeline encoding at [`DEFAULT_JPEG_QUALITY`].
    pub fn new(resolver: MemberResolver) -> Self {
        Self {
            resolver,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Override JPEG quality (clamped to 1..=100 at encode time).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// The resolver members are looked up with.
    pub fn resolver(&self) -> &MemberResolver {
        &self.resolver
    }

    /// Resolve all members and stack them, without encoding.
    #[tracing::instrument(
        skip(self, req),
        fields(head = %req.head, body = %req.body, leg = %req.leg)
    )]
    pub fn assemble(&self, req: &BearRequest) -> BearResult<Assembled> {
        let mut images = Vec::with_capacity(3);
        let mut tiers = [Tier::WorkingDir; 3];
        for (slot, member) in req.members().iter().enumerate() {
            match self.resolver.resolve(member)? {
                Resolution::Found(found) => {
                    tiers[slot] = found.tier;
                    images.push(found.image);
                }
                Resolution::NotFound(misses) => {
                    tracing::debug!(member = %member, "bear incomplete");
                    return Ok(Assembled::Missing(misses));
                }
            }
        }
        Ok(Assembled::Stacked {
            image: compose(images)?,
            tiers,
        })
    }

    /// Resolve, stack and encode a bear.
    pub fn build(&self, req: &BearRequest) -> BearResult<BearOutcome> {
        let (image, tiers) = match self.assemble(req)? {
            Assembled::Stacked { image, tiers } => (image, tiers),
            Assembled::Missing(misses) => return Ok(BearOutcome::Missing(misses)),
        };
        let jpeg = encode_jpeg(&image, self.jpeg_quality)?;
        Ok(BearOutcome::Composed(ComposedBear {
            jpeg,
            width: image.width(),
            height: image.height(),
            tiers,
        }))
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
