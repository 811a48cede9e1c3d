use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF encoding failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("A container needs at least one frame")]
    Empty,

    #[error("Container was declared with {declared} frames, cannot append more")]
    CapacityExceeded { declared: usize },

    #[error("None of the frames could be written")]
    NoFrames,
}

/// Why a single frame was left out of the container.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("could not read source: {0}")]
    Read(#[from] std::io::Error),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}
