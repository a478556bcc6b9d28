//! Replacing the bitmap with an image from a file, a web address or a data URL.

use crate::draw::DrawingContext;
use crate::error::{PaintError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// How long a remote image may take to arrive.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where an image is opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A local path, as picked by a file chooser
    File(PathBuf),
    /// A `file`, `http`, `https` or `data` URL typed by the user
    Url(Url),
}

impl ImageSource {
    /// Parses a path or URL.
    ///
    /// Anything without a scheme is a local path. URLs must use the `file`,
    /// `http`, `https` or `data` scheme.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !value.contains("://") && !value.starts_with("data:") {
            return Ok(ImageSource::File(PathBuf::from(value)));
        }

        let unsupported = || PaintError::UnsupportedSource(value.to_string());
        let url = Url::parse(value).map_err(|_| unsupported())?;
        match url.scheme() {
            "file" if url.to_file_path().is_ok() => {}
            "http" | "https" | "data" => {}
            _ => return Err(unsupported()),
        }
        Ok(ImageSource::Url(url))
    }

    /// Reads the raw, still encoded, image bytes.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            ImageSource::File(path) => Ok(std::fs::read(path)?),
            ImageSource::Url(url) => match url.scheme() {
                "file" => {
                    let path = url
                        .to_file_path()
                        .map_err(|_| PaintError::UnsupportedSource(url.to_string()))?;
                    Ok(std::fs::read(path)?)
                }
                "http" | "https" => fetch(url),
                "data" => decode_data_url(url),
                _ => Err(PaintError::UnsupportedSource(url.to_string())),
            },
        }
    }
}

impl FromStr for ImageSource {
    type Err = PaintError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) if url.scheme() == "data" => {
                let media = url.path().split([';', ',']).next().unwrap_or_default();
                write!(f, "data:{media}")
            }
            ImageSource::Url(url) => write!(f, "{url}"),
        }
    }
}

fn fetch(url: &Url) -> Result<Vec<u8>> {
    log::debug!("Fetching {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(url.clone()).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Decodes the payload of a base64 `data:` URL.
fn decode_data_url(url: &Url) -> Result<Vec<u8>> {
    let invalid = |reason: &str| PaintError::InvalidDataUrl(reason.to_string());
    let (header, payload) = url
        .path()
        .split_once(',')
        .ok_or_else(|| invalid("missing ',' before the payload"))?;
    if !header
        .split(';')
        .any(|part| part.eq_ignore_ascii_case("base64"))
    {
        return Err(invalid("only base64 payloads can hold an image"));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|err| invalid(&err.to_string()))
}

/// Decodes PNG, JPEG, GIF, BMP or WebP bytes into a premultiplied ARGB32
/// image surface.
pub fn decode_image(bytes: &[u8]) -> Result<cairo::ImageSurface> {
    let rgba = ::image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let too_large = |_| PaintError::Cairo(cairo::Error::InvalidSize);
    let stride = cairo::Format::ARgb32.stride_for_width(width)?;
    let width = i32::try_from(width).map_err(too_large)?;
    let height = i32::try_from(height).map_err(too_large)?;

    let row_len = stride as usize;
    let mut data = vec![0u8; row_len * height as usize];
    for (row, pixels) in data.chunks_exact_mut(row_len).zip(rgba.rows()) {
        for (out, pixel) in row.chunks_exact_mut(4).zip(pixels) {
            let [r, g, b, a] = pixel.0;
            let premultiply = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u32;
            let argb = (u32::from(a) << 24)
                | (premultiply(r) << 16)
                | (premultiply(g) << 8)
                | premultiply(b);
            out.copy_from_slice(&argb.to_ne_bytes());
        }
    }

    let surface =
        cairo::ImageSurface::create_for_data(data, cairo::Format::ARgb32, width, height, stride)?;
    log::debug!("Decoded {width}x{height} image");
    Ok(surface)
}

/// Reads and decodes the image at `source`.
pub fn read_image(source: &ImageSource) -> Result<cairo::ImageSurface> {
    let bytes = source.read_bytes()?;
    decode_image(&bytes)
}

/// Replaces the bitmap of `cx` with the image at `source`.
///
/// The bitmap takes the image's size. Stroke and fill color, width, cap,
/// composite mode and font survive the swap. On error the existing bitmap is
/// left untouched.
pub fn load_image(cx: &mut DrawingContext, source: &ImageSource) -> Result<()> {
    let image = read_image(source)?;
    cx.replace_bitmap(&image)?;
    log::info!(
        "Loaded image {source} ({}x{})",
        image.width(),
        image.height()
    );
    Ok(())
}
