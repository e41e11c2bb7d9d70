/// Bundled member resources.
pub mod bundle;
/// Member decoding and JPEG encoding.
pub mod decode;
/// Three-tier member lookup.
pub mod resolver;
