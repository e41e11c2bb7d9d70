//! bearsmith composes a "bear" image from three member images: a head, a body and a leg.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: each member is searched in the working directory, then the configured
//!    base directory, then the resources bundled into the binary. The first hit wins.
//! 2. **Compose**: the three rasters are stacked top to bottom (`head`, `body`, `leg`).
//! 3. **Encode**: the stack is written out as JPEG.
//! 4. **Respond**: `200 image/jpeg`, `404 text/plain` naming the missing member and every
//!    tier that was checked, or `500 text/plain` for anything fatal.
//!
//! Only "file does not exist" moves the search on to the next tier. A member that exists
//! but cannot be read or decoded is an error ([`BearError`]), never a miss.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;

/// Process settings (bind address, base directory, JPEG quality, log filter).
pub mod config;
/// Resolve, compose and encode in one call.
pub mod pipeline;
/// HTTP surface.
pub mod server;

pub use assets::bundle::{BUNDLE_ROOT, Bundle};
pub use assets::decode::{DEFAULT_JPEG_QUALITY, decode_member, encode_jpeg};
pub use assets::resolver::{FoundMember, MemberMisses, MemberResolver, Resolution, TierMiss};
pub use config::{Settings, SettingsOverrides};
pub use foundation::core::{BearRequest, Category, MEMBER_EXT, MemberRequest, Tier};
pub use foundation::error::{BearError, BearResult};
pub use pipeline::{
    Assembled, BearOutcome, BearPipeline, ComposedBear, MISSING_HEADER, missing_report,
};
pub use render::composite::{BACKGROUND, compose, stack_layout};
