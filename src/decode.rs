use alloc::vec::Vec;

use enough::Stop;
use rgb::AsPixels as _;
use rgb::RGBA8;

use crate::error::IlbmError;
use crate::iff::ChunkId;
use crate::ilbm::{self, DecodeOptions, IlbmFile};
use crate::limits::Limits;

/// A decoded image: RGBA8, row-major, `width * height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Typed view of the pixel data.
    pub fn as_pixels(&self) -> &[RGBA8] {
        self.pixels.as_pixels()
    }

    /// The pixel at `(x, y)`, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.as_pixels()
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGBA8> {
        imgref::ImgRef::new(self.as_pixels(), self.width as usize, self.height as usize)
    }

    /// Convert to an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGBA8> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Builder for a decode with optional limits and transparency handling.
///
/// ```no_run
/// use zenilbm::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // ILBM bytes
/// let limits = Limits::with_max_pixels(4096 * 4096);
/// let file = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_transparency(true)
///     .decode(Unstoppable)?;
/// if let Some(image) = file.image() {
///     println!("{}x{}", image.width, image.height);
/// }
/// # Ok::<(), zenilbm::IlbmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    options: DecodeOptions<'a>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.options.limits = Some(limits);
        self
    }

    /// Map `BMHD` masking to alpha: pixels outside the mask plane, or equal
    /// to the transparent colour index, get alpha 0. Off by default.
    pub fn with_transparency(mut self, enabled: bool) -> Self {
        self.options.transparency = enabled;
        self
    }

    /// Decode every chunk.
    ///
    /// Input that is not an ILBM/PBM container is not an error: the result
    /// has no chunks and carries [`Diagnostic::NotAContainer`](crate::ilbm::Diagnostic).
    pub fn decode(self, stop: impl Stop) -> Result<IlbmFile, IlbmError> {
        ilbm::decode_file(self.data, &self.options, &stop)
    }

    /// Decode and return the first image, treating a missing image as an error.
    pub fn decode_image(self, stop: impl Stop) -> Result<DecodedImage, IlbmError> {
        let file = self.decode(stop)?;
        if !file.is_container() {
            return Err(IlbmError::NotAContainer);
        }
        file.into_image()
            .ok_or(IlbmError::MissingChunk(ChunkId::BODY))
    }
}
