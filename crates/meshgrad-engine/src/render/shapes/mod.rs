//! Shape rasterizers, one per `DrawCmd` variant.

pub(crate) mod common;

pub(crate) mod fill;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod ring;
pub(crate) mod stroke;
pub mod text;
