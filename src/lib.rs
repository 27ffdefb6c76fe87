pub mod io;
pub mod tiff;
pub mod utils;
pub mod svs;
pub mod commands;
pub mod api;

pub use crate::api::SlideKit;

pub use tiff::{TiffError, TiffReader, TiffResult};
pub use svs::{LabelParams, SlideInspector, Splicer};
