//! SVS slide de-identification pipeline
//!
//! Everything specific to Aperio SVS slides lives here: locating the label
//! and macro directories, redacting their strips, exporting the label, and
//! building, relocating and splicing the replacement sub-images.

pub mod inspector;
pub mod label_extractor;
pub mod pixels;
pub mod redactor;
pub mod relocator;
pub mod splicer;
pub mod sub_image;
#[cfg(test)]
mod tests;

pub use inspector::{SlideInspector, SlideLayout};
pub use label_extractor::LabelExtractor;
pub use pixels::{LabelParams, ReplacementPixels};
pub use redactor::Redactor;
pub use relocator::{OffsetRelocator, RelocatedSubImage};
pub use splicer::Splicer;
pub use sub_image::{SubImageBuilder, SubImageKind};
