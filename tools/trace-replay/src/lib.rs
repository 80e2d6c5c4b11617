// Copyright 2025. Replay helpers for lasso-trace.
//
// Provides anchor parsing, loop rendering into an RGBA buffer, and BMP/raw output.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write as IoWrite};
use std::path::Path;

use lasso_trace::{ClosedLoop, PathPoint, PointI};

// ============================================================================
// Pixel Buffer
// ============================================================================

pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
pub const TRACE_COLOR: [u8; 4] = [190, 190, 190, 255];
pub const LOOP_COLOR: [u8; 4] = [0, 0, 0, 255];
pub const VERTEX_COLOR: [u8; 4] = [220, 30, 30, 255];

/// An RGBA pixel buffer with dimensions.
#[derive(Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    pub data: Vec<u8>,
}

/// Byte length of an RGBA buffer, computed without `u32` overflow.
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; rgba_len(width, height)],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Set one pixel; coordinates off the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn plot(&mut self, points: &[PointI], rgba: [u8; 4]) {
        for p in points {
            self.set_pixel(p.x, p.y, rgba);
        }
    }
}

/// Draw the traced path in gray, the extracted loop in black and its
/// vertices in red, on a white background.
pub fn render_loop(width: u32, height: u32, trace: &[PathPoint], lasso: &ClosedLoop) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(width, height, BACKGROUND);
    for p in trace {
        buf.set_pixel(p.x, p.y, TRACE_COLOR);
    }
    buf.plot(lasso.points(), LOOP_COLOR);
    buf.plot(lasso.vertices(), VERTEX_COLOR);
    buf
}

// ============================================================================
// Anchors
// ============================================================================

/// Parse an anchor written as `x,y`.
pub fn parse_point(s: &str) -> Option<PointI> {
    let (x, y) = s.split_once(',')?;
    Some(PointI::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Parse a surface size written as `WxH`.
pub fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(&['x', 'X'][..])?;
    let (w, h) = (w.parse().ok()?, h.parse().ok()?);
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

// ============================================================================
// Loop report
// ============================================================================

/// Human-readable summary of an extracted loop.
pub struct LoopReport<'a>(pub &'a ClosedLoop);

impl fmt::Display for LoopReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lasso = self.0;
        write!(
            f,
            "loop: {} points, {} vertices",
            lasso.points().len(),
            lasso.vertices().len()
        )?;
        if let Some(r) = lasso.bounding_rect() {
            write!(f, ", bounds ({}, {})-({}, {})", r.x1, r.y1, r.x2, r.y2)?;
        }
        for v in lasso.vertices() {
            write!(f, "\n  vertex ({}, {})", v.x, v.y)?;
        }
        Ok(())
    }
}

// ============================================================================
// Image output
// ============================================================================

/// Write a 32-bit top-down BMP (BGRA rows) to `out`.
pub fn write_bmp<W: IoWrite>(out: &mut W, buf: &PixelBuffer) -> io::Result<()> {
    const HEADERS: u32 = 14 + 40;
    let too_big = || io::Error::new(io::ErrorKind::InvalidInput, "image too large for BMP");
    let image_size = u32::try_from(buf.data.len()).map_err(|_| too_big())?;
    let file_size = image_size.checked_add(HEADERS).ok_or_else(too_big)?;
    let height = i32::try_from(buf.height).map_err(|_| too_big())?;

    out.write_all(b"BM")?;
    out.write_all(&file_size.to_le_bytes())?;
    out.write_all(&0u32.to_le_bytes())?;
    out.write_all(&HEADERS.to_le_bytes())?;

    // BITMAPINFOHEADER; negative height marks top-down rows.
    out.write_all(&40u32.to_le_bytes())?;
    out.write_all(&buf.width.to_le_bytes())?;
    out.write_all(&(-height).to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?;
    out.write_all(&32u16.to_le_bytes())?;
    out.write_all(&0u32.to_le_bytes())?;
    out.write_all(&image_size.to_le_bytes())?;
    out.write_all(&[0u8; 16])?;

    let mut row = Vec::with_capacity(buf.width as usize * 4);
    for line in buf.data.chunks_exact((buf.width as usize * 4).max(1)) {
        row.clear();
        for px in line.chunks_exact(4) {
            row.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
        out.write_all(&row)?;
    }
    Ok(())
}

/// Write `[width:u32 LE][height:u32 LE][rgba...]` to `out`.
pub fn write_raw<W: IoWrite>(out: &mut W, buf: &PixelBuffer) -> io::Result<()> {
    out.write_all(&buf.width.to_le_bytes())?;
    out.write_all(&buf.height.to_le_bytes())?;
    out.write_all(&buf.data)
}

/// Save an image file, choosing the format from the extension.
pub fn save_image(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    let ext = path.extension().and_then(|e| e.to_str());
    if !matches!(ext, Some("bmp") | Some("raw") | Some("rgba")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported image format: {}", path.display()),
        ));
    }
    let mut out = BufWriter::new(File::create(path)?);
    match ext {
        Some("bmp") => write_bmp(&mut out, buf)?,
        _ => write_raw(&mut out, buf)?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasso_trace::{PathStorage, TraceConfig};

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4"), Some(PointI::new(3, 4)));
        assert_eq!(parse_point(" -2 , 7"), Some(PointI::new(-2, 7)));
        assert_eq!(parse_point("3"), None);
        assert_eq!(parse_point("a,4"), None);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x32"), Some((64, 32)));
        assert_eq!(parse_size("64X32"), Some((64, 32)));
        assert_eq!(parse_size("0x32"), None);
        assert_eq!(parse_size("64"), None);
    }

    #[test]
    fn test_set_pixel_clips() {
        let mut buf = PixelBuffer::filled(4, 4, BACKGROUND);
        buf.set_pixel(-1, 0, LOOP_COLOR);
        buf.set_pixel(4, 0, LOOP_COLOR);
        buf.set_pixel(2, 3, LOOP_COLOR);
        assert_eq!(buf.pixel(2, 3), LOOP_COLOR);
        assert_eq!(buf.pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_render_bowtie() {
        let config = TraceConfig::new();
        let anchors = [(0, 0), (10, 10), (10, 0), (0, 10)].map(PointI::from);
        let path = PathStorage::from_anchors(anchors, &config).unwrap();
        let trace = path.points().to_vec();
        let lasso = path.close(&config).unwrap();
        let buf = render_loop(16, 16, &trace, &lasso);
        assert_eq!(buf.pixel(5, 5), VERTEX_COLOR);
        assert_eq!(buf.pixel(10, 5), LOOP_COLOR);
        // Discarded lobe stays in the trace color.
        assert_eq!(buf.pixel(0, 5), TRACE_COLOR);
        assert_eq!(buf.pixel(15, 15), BACKGROUND);
    }

    #[test]
    fn test_report() {
        let config = TraceConfig::new();
        let path = PathStorage::from_anchors([(0, 0), (4, 0), (4, 4)].map(PointI::from), &config)
            .unwrap();
        let lasso = path.close(&config).unwrap();
        let text = LoopReport(&lasso).to_string();
        assert!(text.starts_with("loop: 13 points, 4 vertices, bounds (0, 0)-(4, 4)"));
        assert!(text.contains("vertex (4, 4)"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_rgba_len_does_not_wrap_u32() {
        assert_eq!(rgba_len(3, 2), 24);
        assert_eq!(rgba_len(40_000, 40_000), 6_400_000_000);
    }

    #[test]
    fn test_bmp_rows_are_bgra() {
        let mut buf = PixelBuffer::filled(2, 1, BACKGROUND);
        buf.set_pixel(1, 0, VERTEX_COLOR);
        let mut bytes = Vec::new();
        write_bmp(&mut bytes, &buf).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        assert_eq!(bytes.len(), 54 + 8);
        assert_eq!(&bytes[22..26], &(-1i32).to_le_bytes());
        assert_eq!(&bytes[58..62], &[30, 30, 220, 255]);
    }

    #[test]
    fn test_raw_header() {
        let buf = PixelBuffer::filled(3, 2, LOOP_COLOR);
        let mut bytes = Vec::new();
        write_raw(&mut bytes, &buf).unwrap();
        assert_eq!(&bytes[..8], &[3, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(bytes.len(), 8 + 24);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let buf = PixelBuffer::filled(1, 1, BACKGROUND);
        let path = std::env::temp_dir().join("trace_replay_test_unknown.png");
        let err = save_image(&path, &buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_bmp_size() {
        let buf = PixelBuffer::filled(3, 2, BACKGROUND);
        let path = std::env::temp_dir().join("trace_replay_test_save.bmp");
        save_image(&path, &buf).unwrap();
        let len = std::fs::metadata(&path).unwrap().len();
        std::fs::remove_file(&path).ok();
        assert_eq!(len, 14 + 40 + 3 * 2 * 4);
    }
}
