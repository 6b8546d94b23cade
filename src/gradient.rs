use crate::{color::Palette, compositor::Compositor, error::ThemeError};
use image::{
    io::Reader, DynamicImage, ImageError, ImageFormat, ImageOutputFormat, Rgba, RgbaImage,
};
use log::debug;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Recolor `source` with a horizontal gradient across `palette`.
///
/// Every pixel takes the palette color of its column and keeps its own alpha,
/// so the template's silhouette survives while its fill is replaced. The
/// result always has the source's dimensions.
pub fn synthesize(source: &RgbaImage, palette: &Palette) -> RgbaImage {
    let (width, height) = source.dimensions();
    let columns = palette.column_colors(width);

    RgbaImage::from_fn(width, height, |x, y| {
        let [red, green, blue] = columns[x as usize].to_array();
        let alpha = source.get_pixel(x, y)[3];
        Rgba([red, green, blue, alpha])
    })
}

/// Decode any image format `image` understands into RGBA8.
///
/// The format is sniffed from the file contents; the extension is only a
/// fallback when the contents are not recognized.
pub fn decode(path: &Path) -> Result<RgbaImage, ThemeError> {
    let source = Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| ThemeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "decoded {} ({}x{})",
        path.display(),
        source.width(),
        source.height()
    );
    Ok(source.to_rgba8())
}

/// Encode `image` to `path`, picking the format from the file extension.
pub fn encode(image: RgbaImage, path: &Path) -> Result<(), ThemeError> {
    let encode_err = |reason: String| ThemeError::Encode {
        path: path.to_path_buf(),
        reason,
    };

    let format = ImageFormat::from_path(path).map_err(|e| encode_err(e.to_string()))?;
    let output_format = ImageOutputFormat::from(format);
    if let ImageOutputFormat::Unsupported(name) = &output_format {
        return Err(encode_err(format!("unsupported output format: {name}")));
    }

    let file = File::create(path).map_err(|e| encode_err(e.to_string()))?;
    let mut out_file = BufWriter::new(file);
    let written = DynamicImage::ImageRgba8(image)
        .write_to(&mut out_file, output_format)
        .map_err(|e| encode_err(e.to_string()))
        .and_then(|_| out_file.flush().map_err(|e| encode_err(e.to_string())));

    if written.is_err() {
        // Don't leave a truncated file behind.
        drop(out_file);
        let _ = std::fs::remove_file(path);
    }
    written
}

/// Decode `input`, apply the palette gradient, optionally draw `overlay`
/// text, and write the result to `output`.
///
/// Nothing is written when decoding fails.
pub fn apply_gradient(
    input: &Path,
    output: &Path,
    palette: &Palette,
    overlay: Option<(&dyn Compositor, &str)>,
) -> Result<(), ThemeError> {
    let source = decode(input)?;
    let mut gradient = synthesize(&source, palette);

    if let Some((compositor, text)) = overlay {
        compositor.composite(&mut gradient, text)?;
    }

    encode(gradient, output)
}
