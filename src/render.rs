pub(crate) mod drawer;
pub(crate) mod options;
pub(crate) mod raster;
pub(crate) mod svg;
pub(crate) mod waveform;
