//! Individual normalization steps

pub mod decode;
pub mod denoise;
pub mod glyph_height;
pub mod pad;
pub mod polarity;
pub mod rescale;
pub mod threshold;
