//! 8-bit grayscale BMP boundary.
//!
//! Minimal decoder/encoder for uncompressed, palettized 8 bits-per-pixel
//! Windows bitmaps (BITMAPINFOHEADER or larger). This is the file-level
//! collaborator of the compression core: it turns bytes into a
//! [`GrayImage`] and back, nothing more. Filesystem access belongs to
//! the caller.

use crate::error::{CompressionError, Result};
use crate::image::GrayImage;

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;
const PALETTE_SIZE: usize = 256 * 4;
const BI_RGB: u32 = 0;

/// A little-endian cursor over a BMP byte source.
struct BmpReader<'a> {
    source: &'a [u8],
    position: usize,
}

impl<'a> BmpReader<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let value = *self
            .source
            .get(self.position)
            .ok_or_else(|| CompressionError::Decode("unexpected end of data".into()))?;
        self.position += 1;
        Ok(value)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let low = self.read_u8()? as u16;
        let high = self.read_u8()? as u16;
        Ok(low | high << 8)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let low = self.read_u16()? as u32;
        let high = self.read_u16()? as u32;
        Ok(low | high << 16)
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.source.len() {
            return Err(CompressionError::Decode("unexpected end of data".into()));
        }
        self.position = position;
        Ok(())
    }
}

/// Decodes an 8-bit uncompressed grayscale BMP into an image buffer.
///
/// Palette entries are mapped to intensity (BT.601 luma, which is the
/// identity for the grayscale palettes this crate writes). Bottom-up
/// and top-down row orders are both accepted. Anything that is not an
/// uncompressed 8 bpp bitmap is a [`CompressionError::Decode`].
pub fn decode(data: &[u8]) -> Result<GrayImage> {
    let mut reader = BmpReader::new(data);

    if reader.read_u8()? != b'B' || reader.read_u8()? != b'M' {
        return Err(CompressionError::Decode("missing BM signature".into()));
    }
    reader.read_u32()?; // file size, unreliable in the wild
    reader.read_u32()?; // reserved
    let pixel_offset = reader.read_u32()? as usize;

    let header_size = reader.read_u32()? as usize;
    if header_size < INFO_HEADER_SIZE {
        return Err(CompressionError::Decode(format!(
            "unsupported header size {}",
            header_size
        )));
    }
    let width = reader.read_i32()?;
    let height = reader.read_i32()?;
    let planes = reader.read_u16()?;
    let bits_per_pixel = reader.read_u16()?;
    let compression = reader.read_u32()?;
    reader.read_u32()?; // image size
    reader.read_i32()?; // x pixels per meter
    reader.read_i32()?; // y pixels per meter
    let colors_used = reader.read_u32()? as usize;

    if planes != 1 {
        return Err(CompressionError::Decode(format!(
            "unsupported plane count {}",
            planes
        )));
    }
    if bits_per_pixel != 8 {
        return Err(CompressionError::Decode(format!(
            "unsupported bit depth {}, only 8 bpp grayscale is handled",
            bits_per_pixel
        )));
    }
    if compression != BI_RGB {
        return Err(CompressionError::Decode(format!(
            "unsupported compression {}",
            compression
        )));
    }
    if width <= 0 || height == 0 {
        return Err(CompressionError::Decode(format!(
            "invalid dimensions {}x{}",
            width, height
        )));
    }

    // Palette sits right after the info header. Missing entries fall
    // back to the identity mapping.
    let palette_entries = if colors_used == 0 { 256 } else { colors_used.min(256) };
    let mut intensity = [0u8; 256];
    for (i, slot) in intensity.iter_mut().enumerate() {
        *slot = i as u8;
    }
    reader.seek(FILE_HEADER_SIZE + header_size)?;
    for slot in intensity.iter_mut().take(palette_entries) {
        let blue = reader.read_u8()? as u32;
        let green = reader.read_u8()? as u32;
        let red = reader.read_u8()? as u32;
        reader.read_u8()?; // reserved
        *slot = ((299 * red + 587 * green + 114 * blue + 500) / 1000) as u8;
    }

    let cols = width as usize;
    let rows = height.unsigned_abs() as usize;
    let top_down = height < 0;
    let stride = (cols + 3) & !3;

    if pixel_offset + stride * rows > data.len() {
        return Err(CompressionError::Decode(
            "pixel data extends past end of file".into(),
        ));
    }

    let mut samples = vec![0u8; rows * cols];
    for r in 0..rows {
        // Bottom-up files store the last image row first.
        let source_row = if top_down { r } else { rows - 1 - r };
        reader.seek(pixel_offset + source_row * stride)?;
        for c in 0..cols {
            samples[r * cols + c] = intensity[reader.read_u8()? as usize];
        }
    }

    GrayImage::from_raw(rows, cols, samples)
}

/// Encodes an image as an 8-bit uncompressed BMP with a 256-entry
/// grayscale palette and 4-byte-aligned bottom-up rows.
pub fn encode(image: &GrayImage) -> Result<Vec<u8>> {
    let rows = image.rows();
    let cols = image.cols();
    if rows == 0 || cols == 0 {
        return Err(CompressionError::Encode("empty image".into()));
    }
    if rows > i32::MAX as usize || cols > i32::MAX as usize {
        return Err(CompressionError::Encode("image dimensions overflow BMP header".into()));
    }

    let stride = (cols + 3) & !3;
    let pixel_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;
    let image_size = stride * rows;
    let file_size = pixel_offset + image_size;

    let mut out = Vec::with_capacity(file_size);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    write_u32(&mut out, file_size as u32);
    write_u32(&mut out, 0); // reserved
    write_u32(&mut out, pixel_offset as u32);

    // BITMAPINFOHEADER
    write_u32(&mut out, INFO_HEADER_SIZE as u32);
    write_u32(&mut out, cols as u32);
    write_u32(&mut out, rows as u32); // positive height: bottom-up
    write_u16(&mut out, 1); // planes
    write_u16(&mut out, 8); // bits per pixel
    write_u32(&mut out, BI_RGB);
    write_u32(&mut out, image_size as u32);
    write_u32(&mut out, 2835); // 72 dpi, pixels per meter
    write_u32(&mut out, 2835);
    write_u32(&mut out, 256); // colors used
    write_u32(&mut out, 256); // important colors

    // Grayscale palette: entry i maps to intensity i.
    for i in 0..=255u8 {
        out.extend_from_slice(&[i, i, i, 0]);
    }

    let padding = [0u8; 3];
    for r in (0..rows).rev() {
        out.extend_from_slice(image.row(r));
        out.extend_from_slice(&padding[..stride - cols]);
    }

    Ok(out)
}

fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
