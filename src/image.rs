use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Chunk, Filter, Finish, Pdf, Ref};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Why an image asset could not be used. These never reach callers of the
/// label engine; a failed logo is replaced by the synthesized one.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Svg(#[from] usvg::Error),

    #[error("failed to convert svg: {0}")]
    SvgConversion(String),
}

pub enum RasterImageType {
    /// Baseline RGB JPEG bytes, embedded as-is
    DirectlyEmbeddableJpeg(Vec<u8>),
    Image(DynamicImage),
}

pub enum ImageType {
    Raster(RasterImageType),
    /// An SVG already converted into a self-contained PDF form xobject,
    /// along with the id of that xobject inside the chunk
    Svg { chunk: Chunk, root: Ref },
}

/// An image that can be placed on pages. Both raster and vector images are
/// drawn into the unit square, so placing one means scaling it to the target
/// rectangle.
pub struct Image {
    pub image: ImageType,
    /// Intrinsic width (pixels for raster images, user units for SVGs)
    pub width: f32,
    /// Intrinsic height (pixels for raster images, user units for SVGs)
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, picking the SVG path by file extension
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, AssetError> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        let data = std::fs::read(path)?;
        if is_svg {
            Self::new_svg(&data)
        } else {
            Self::new_raster_from_bytes(data)
        }
    }

    pub fn new_svg(data: &[u8]) -> Result<Image, AssetError> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();
        let (chunk, root) = svg2pdf::to_chunk(&tree, svg2pdf::ConversionOptions::default())
            .map_err(|e| AssetError::SvgConversion(format!("{e:?}")))?;

        Ok(Image {
            image: ImageType::Svg { chunk, root },
            width: size.width(),
            height: size.height(),
        })
    }

    pub fn new_raster_from_bytes(data: Vec<u8>) -> Result<Image, AssetError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => {
                // we can embed it directly!
                let width = image.width() as f32;
                let height = image.height() as f32;

                Ok(Image {
                    image: ImageType::Raster(RasterImageType::DirectlyEmbeddableJpeg(data)),
                    width,
                    height,
                })
            }
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image: ImageType::Raster(RasterImageType::Image(image)),
            width,
            height,
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    fn encode_raster(raster: &RasterImageType) -> EncodeOutput {
        match raster {
            RasterImageType::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        match &self.image {
            ImageType::Raster(raster) => {
                let id = refs.gen(RefType::Image(image_index));
                let encoded = Self::encode_raster(raster);

                let mask_id = encoded
                    .mask
                    .as_ref()
                    .map(|_| refs.gen(RefType::ImageMask(image_index)));

                let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
                image.filter(encoded.filter);
                image.width(self.width as i32);
                image.height(self.height as i32);
                image.color_space().device_rgb();
                image.bits_per_component(8);
                if let Some(mask_id) = mask_id {
                    image.s_mask(mask_id);
                }
                image.finish();

                // add a transparency mask if we have one
                if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
                    let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
                    s_mask.filter(Filter::FlateDecode);
                    s_mask.width(self.width as i32);
                    s_mask.height(self.height as i32);
                    s_mask.color_space().device_gray();
                    s_mask.bits_per_component(8);
                }
            }
            ImageType::Svg { chunk, root } => {
                // the converted chunk numbers its objects from 1; move them into our id space
                let mut mapping: HashMap<Ref, Ref> = HashMap::new();
                let renumbered = chunk.renumber(|old| *mapping.entry(old).or_insert_with(|| refs.next()));
                if let Some(&id) = mapping.get(root) {
                    refs.set(RefType::Image(image_index), id);
                }
                writer.extend(&renumbered);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_bytes_load_as_raster() {
        let mut bytes: Vec<u8> = Vec::new();
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(6, 3));
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .expect("can encode png");

        let image = Image::new_raster_from_bytes(bytes).expect("png loads");
        assert_eq!(image.width, 6.0);
        assert_eq!(image.height, 3.0);
        assert!((image.aspect_ratio() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn svg_source_loads_with_its_size() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="30" height="16">
            <rect x="0" y="0" width="30" height="16" fill="navy"/>
        </svg>"#;
        let image = Image::new_svg(svg).expect("svg loads");
        assert_eq!(image.width, 30.0);
        assert_eq!(image.height, 16.0);
        assert!(matches!(image.image, ImageType::Svg { .. }));
    }

    #[test]
    fn corrupt_raster_is_an_error() {
        assert!(Image::new_raster_from_bytes(b"definitely not a png".to_vec()).is_err());
    }
}
