// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded image extraction. JPEG and JPEG 2000 streams are written as-is;
// raw and Flate-compressed 8-bit samples are re-encoded as PNG.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use ::image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdftool_core::error::{PdfToolError, Result};
use pdftool_core::output;
use pdftool_core::types::ImageFormat;
use tracing::{debug, info, instrument, warn};

use crate::pdf::PdfReader;
use crate::pdf::pages;

/// Nesting limit for form XObjects drawing other form XObjects.
const MAX_FORM_DEPTH: usize = 8;

/// One picture found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// 1-based position over the whole document.
    pub index: usize,
    /// Number of images extracted from the document.
    pub total: usize,
    /// 1-based page the image was first drawn on.
    pub page: u32,
    pub format: ImageFormat,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Encoded file contents.
    pub data: Vec<u8>,
}

impl ExtractedImage {
    /// File name such as `image_03_of_12_page_05.png`.
    pub fn file_name(&self) -> String {
        format!(
            "image_{:02}_of_{:02}_page_{:02}.{}",
            self.index,
            self.total,
            self.page,
            self.format.extension()
        )
    }
}

/// Collect every image of the document in page order, then resource order.
///
/// An image referenced from several pages or names is returned once, for
/// the first page it appears on. Encodings that cannot be written as a
/// standalone file are skipped with a warning and do not count towards
/// [`ExtractedImage::total`].
#[instrument(skip_all, fields(pages = reader.page_count()))]
pub fn extract_images(reader: &PdfReader) -> Result<Vec<ExtractedImage>> {
    let doc = reader.document();
    let mut walker = Walker {
        doc,
        seen: HashSet::new(),
        found: Vec::new(),
    };

    for (page_number, page_id) in doc.get_pages() {
        if let Some(Object::Dictionary(resources)) =
            pages::inherited_attribute(doc, page_id, b"Resources")
        {
            walker.visit_resources(resources, page_number, 0)?;
        }
    }

    let total = walker.found.len();
    let images: Vec<ExtractedImage> = walker
        .found
        .into_iter()
        .enumerate()
        .map(|(position, image)| ExtractedImage {
            index: position + 1,
            total,
            ..image
        })
        .collect();

    info!(count = images.len(), "Images extracted");
    Ok(images)
}

/// Write images into a new timestamped directory below `base_dir`.
///
/// Returns the written paths. Nothing is created for an empty list.
#[instrument(skip_all, fields(count = images.len(), base_dir = %base_dir.display()))]
pub fn save_images(images: &[ExtractedImage], base_dir: &Path) -> Result<Vec<PathBuf>> {
    if images.is_empty() {
        return Ok(Vec::new());
    }

    output::with_batch_dir(base_dir, |batch_dir| {
        let mut written = Vec::with_capacity(images.len());
        for image in images {
            let path = batch_dir.join(image.file_name());
            std::fs::write(&path, &image.data)?;
            written.push(path);
        }
        info!(files = written.len(), dir = %batch_dir.display(), "Images saved");
        Ok(written)
    })
}

struct Walker<'a> {
    doc: &'a Document,
    /// XObjects already visited, so shared images and forms count once.
    seen: HashSet<ObjectId>,
    found: Vec<ExtractedImage>,
}

impl Walker<'_> {
    fn visit_resources(&mut self, resources: &Dictionary, page: u32, depth: usize) -> Result<()> {
        let doc = self.doc;
        let Some(Object::Dictionary(xobjects)) = resources
            .get(b"XObject")
            .ok()
            .and_then(|object| pages::resolve(doc, object))
        else {
            return Ok(());
        };

        for (name, value) in xobjects.iter() {
            let Object::Reference(id) = value else {
                continue;
            };
            if !self.seen.insert(*id) {
                continue;
            }
            let Ok(Object::Stream(stream)) = doc.get_object(*id) else {
                continue;
            };

            match stream.dict.get(b"Subtype").and_then(Object::as_name) {
                Ok(b"Image") => self.visit_image(stream, page, &String::from_utf8_lossy(name))?,
                Ok(b"Form") if depth < MAX_FORM_DEPTH => {
                    if let Some(Object::Dictionary(form_resources)) = stream
                        .dict
                        .get(b"Resources")
                        .ok()
                        .and_then(|object| pages::resolve(doc, object))
                    {
                        self.visit_resources(form_resources, page, depth + 1)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn visit_image(&mut self, stream: &Stream, page: u32, name: &str) -> Result<()> {
        let dict = &stream.dict;
        let dimension = |key: &[u8]| {
            dict.get(key)
                .ok()
                .and_then(|object| pages::resolve(self.doc, object))
                .and_then(|object| object.as_i64().ok())
                .and_then(|value| u32::try_from(value).ok())
        };
        let width = dimension(b"Width");
        let height = dimension(b"Height");

        let encoded = match encode(self.doc, stream, width, height) {
            Ok(encoded) => encoded,
            Err(reason) => {
                warn!(page, name, %reason, "Skipping image");
                return Ok(());
            }
        };
        let (format, data) = encoded?;

        debug!(page, name, ?format, bytes = data.len(), "Image found");
        self.found.push(ExtractedImage {
            index: 0,
            total: 0,
            page,
            format,
            width,
            height,
            data,
        });
        Ok(())
    }
}

/// Turn an image XObject into file contents.
///
/// The outer `Err` is a reason to skip the image; the inner result carries
/// encoder failures, which abort the extraction.
fn encode(
    doc: &Document,
    stream: &Stream,
    width: Option<u32>,
    height: Option<u32>,
) -> std::result::Result<Result<(ImageFormat, Vec<u8>)>, String> {
    let filters = filter_names(doc, &stream.dict);

    match filters.as_slice() {
        [b"DCTDecode"] => return Ok(Ok((ImageFormat::Jpeg, stream.content.clone()))),
        [b"JPXDecode"] => return Ok(Ok((ImageFormat::Jpeg2000, stream.content.clone()))),
        [] | [b"FlateDecode"] | [b"LZWDecode"] => {}
        other => {
            let names: Vec<String> = other
                .iter()
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .collect();
            return Err(format!("unsupported filter chain {names:?}"));
        }
    }

    if matches!(stream.dict.get(b"ImageMask"), Ok(Object::Boolean(true))) {
        return Err("stencil mask".into());
    }
    let bits = stream
        .dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(8);
    if bits != 8 {
        return Err(format!("{bits} bits per component"));
    }
    let (Some(width), Some(height)) = (width, height) else {
        return Err("missing dimensions".into());
    };
    let space = stream
        .dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|object| ColorSpace::from_object(doc, object, 0))
        .ok_or_else(|| "unsupported colour space".to_string())?;
    let samples = pages::stream_bytes(stream).ok_or_else(|| "undecodable stream".to_string())?;

    let picture = build_image(&space, width, height, &samples)
        .ok_or_else(|| "sample data shorter than the image".to_string())?;
    Ok(to_png(&picture).map(|png| (ImageFormat::Png, png)))
}

fn filter_names<'a>(doc: &'a Document, dict: &'a Dictionary) -> Vec<&'a [u8]> {
    let Some(filter) = dict
        .get(b"Filter")
        .ok()
        .and_then(|object| pages::resolve(doc, object))
    else {
        return Vec::new();
    };
    match filter {
        Object::Name(name) => vec![name.as_slice()],
        Object::Array(items) => items
            .iter()
            .filter_map(|item| item.as_name().ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Indexed { base: Box<ColorSpace>, lookup: Vec<u8> },
}

impl ColorSpace {
    fn from_object(doc: &Document, object: &Object, depth: usize) -> Option<Self> {
        if depth > 2 {
            return None;
        }
        match pages::resolve(doc, object)? {
            Object::Name(name) => Self::from_family(name),
            Object::Array(items) => {
                let family = items.first()?.as_name().ok()?;
                match family {
                    b"ICCBased" => {
                        let profile = pages::resolve(doc, items.get(1)?)?.as_stream().ok()?;
                        match profile.dict.get(b"N").and_then(Object::as_i64).ok()? {
                            1 => Some(Self::Gray),
                            3 => Some(Self::Rgb),
                            4 => Some(Self::Cmyk),
                            _ => None,
                        }
                    }
                    b"Indexed" | b"I" => {
                        let base = Self::from_object(doc, items.get(1)?, depth + 1)?;
                        let lookup = match pages::resolve(doc, items.get(3)?)? {
                            Object::String(bytes, _) => bytes.clone(),
                            Object::Stream(stream) => pages::stream_bytes(stream)?,
                            _ => return None,
                        };
                        Some(Self::Indexed {
                            base: Box::new(base),
                            lookup,
                        })
                    }
                    other => Self::from_family(other),
                }
            }
            _ => None,
        }
    }

    fn from_family(name: &[u8]) -> Option<Self> {
        match name {
            b"DeviceGray" | b"CalGray" | b"G" => Some(Self::Gray),
            b"DeviceRGB" | b"CalRGB" | b"RGB" => Some(Self::Rgb),
            b"DeviceCMYK" | b"CMYK" => Some(Self::Cmyk),
            _ => None,
        }
    }

    fn components(&self) -> usize {
        match self {
            Self::Gray | Self::Indexed { .. } => 1,
            Self::Rgb => 3,
            Self::Cmyk => 4,
        }
    }
}

fn build_image(space: &ColorSpace, width: u32, height: u32, samples: &[u8]) -> Option<DynamicImage> {
    let pixels = (width as usize).checked_mul(height as usize)?;
    let needed = pixels.checked_mul(space.components())?;
    let samples = samples.get(..needed)?;

    match space {
        ColorSpace::Gray => {
            GrayImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageLuma8)
        }
        ColorSpace::Rgb => {
            RgbImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageRgb8)
        }
        ColorSpace::Cmyk => {
            let rgb = samples.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        ColorSpace::Indexed { base, lookup } => {
            let size = base.components();
            let expanded: Vec<u8> = samples
                .iter()
                .flat_map(|&index| {
                    let start = index as usize * size;
                    lookup
                        .get(start..start + size)
                        .map(<[u8]>::to_vec)
                        .unwrap_or_else(|| vec![0; size])
                })
                .collect();
            build_image(base, width, height, &expanded)
        }
    }
}

fn cmyk_to_rgb(pixel: &[u8]) -> [u8; 3] {
    let black = 255 - u16::from(pixel[3]);
    [pixel[0], pixel[1], pixel[2]].map(|ink| ((255 - u16::from(ink)) * black / 255) as u8)
}

fn to_png(picture: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    picture
        .write_to(&mut Cursor::new(&mut buffer), ::image::ImageFormat::Png)
        .map_err(|err| PdfToolError::ImageError(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use lopdf::{Stream, dictionary};

    fn reader_for(doc: &mut Document) -> PdfReader {
        PdfReader::from_bytes(&test_support::to_bytes(doc)).expect("load fixture")
    }

    #[test]
    fn images_are_counted_named_and_ordered() {
        let reader = reader_for(&mut test_support::pdf_with_images());
        let images = extract_images(&reader).expect("extract");

        let names: Vec<String> = images.iter().map(ExtractedImage::file_name).collect();
        assert_eq!(
            names,
            vec![
                "image_01_of_03_page_01.jpg",
                "image_02_of_03_page_01.png",
                "image_03_of_03_page_02.png",
            ]
        );
        assert_eq!(images[0].data, test_support::FAKE_JPEG);
        assert_eq!((images[0].width, images[0].height), (Some(2), Some(2)));
    }

    #[test]
    fn raw_and_flate_samples_become_png() {
        let reader = reader_for(&mut test_support::pdf_with_images());
        let images = extract_images(&reader).expect("extract");

        let rgb = ::image::load_from_memory(&images[1].data).expect("decode rgb png");
        assert_eq!((rgb.width(), rgb.height()), (2, 2));
        assert_eq!(rgb.to_rgb8().get_pixel(0, 0).0, [255, 0, 0]);

        let gray = ::image::load_from_memory(&images[2].data).expect("decode gray png");
        assert_eq!((gray.width(), gray.height()), (64, 64));
        assert_eq!(gray.to_luma8().get_pixel(10, 10).0, [200]);
    }

    #[test]
    fn document_without_images_yields_empty_list() {
        let reader = reader_for(&mut test_support::pdf_with_pages(&["A", "B"]));
        assert!(extract_images(&reader).expect("extract").is_empty());
    }

    #[test]
    fn unsupported_encodings_do_not_count() {
        let mut doc = test_support::pdf_with_pages(&["A"]);
        let fax_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 8,
                "Height" => 8,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 1,
                "Filter" => "CCITTFaxDecode",
            },
            vec![0; 8],
        ));
        let jpeg_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 2,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            test_support::FAKE_JPEG.to_vec(),
        ));
        let page_id = *doc.get_pages().get(&1).expect("page");
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .expect("page dict")
            .set(
                "Resources",
                dictionary! { "XObject" => dictionary! { "Fax" => fax_id, "Photo" => jpeg_id } },
            );

        let images = extract_images(&reader_for(&mut doc)).expect("extract");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].total, 1);
        assert_eq!(images[0].format, ImageFormat::Jpeg);
    }

    fn show_on_first_page(doc: &mut Document, xobjects: Dictionary) {
        let page_id = *doc.get_pages().get(&1).expect("page");
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .expect("page dict")
            .set("Resources", dictionary! { "XObject" => xobjects });
    }

    #[test]
    fn jpeg_2000_streams_pass_through() {
        let jp2: &[u8] = b"\x00\x00\x00\x0CjP  \r\n\x87\nfixture-codestream";
        let mut doc = test_support::pdf_with_pages(&["A"]);
        let jpx_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 3,
                "Height" => 2,
                "Filter" => "JPXDecode",
            },
            jp2.to_vec(),
        ));
        show_on_first_page(&mut doc, dictionary! { "Im1" => jpx_id });

        let images = extract_images(&reader_for(&mut doc)).expect("extract");

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].format, ImageFormat::Jpeg2000);
        assert_eq!(images[0].file_name(), "image_01_of_01_page_01.jp2");
        assert_eq!(images[0].data, jp2);
        assert_eq!((images[0].width, images[0].height), (Some(3), Some(2)));
    }

    #[test]
    fn icc_based_rgb_samples_become_png() {
        let mut doc = test_support::pdf_with_pages(&["A"]);
        let profile_id = doc.add_object(Stream::new(
            dictionary! { "N" => 3, "Alternate" => "DeviceRGB" },
            b"fixture-icc-profile".to_vec(),
        ));
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 1,
                "ColorSpace" => vec![Object::Name(b"ICCBased".to_vec()), Object::Reference(profile_id)],
                "BitsPerComponent" => 8,
            },
            vec![255, 0, 0, 0, 0, 255],
        ));
        show_on_first_page(&mut doc, dictionary! { "Im1" => image_id });

        let images = extract_images(&reader_for(&mut doc)).expect("extract");

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].format, ImageFormat::Png);
        let picture = ::image::load_from_memory(&images[0].data).expect("decode png");
        assert_eq!((picture.width(), picture.height()), (2, 1));
        assert_eq!(picture.to_rgb8().get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn indexed_and_cmyk_samples_expand_to_rgb() {
        let palette = ColorSpace::Indexed {
            base: Box::new(ColorSpace::Rgb),
            lookup: vec![0, 0, 0, 10, 20, 30],
        };
        let picture = build_image(&palette, 2, 1, &[1, 0]).expect("indexed");
        assert_eq!(picture.to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);

        let picture = build_image(&ColorSpace::Cmyk, 1, 1, &[0, 255, 255, 0]).expect("cmyk");
        assert_eq!(picture.to_rgb8().get_pixel(0, 0).0, [255, 0, 0]);

        assert!(build_image(&ColorSpace::Rgb, 4, 4, &[0; 5]).is_none());
    }

    #[test]
    fn save_writes_into_timestamped_directory() {
        let reader = reader_for(&mut test_support::pdf_with_images());
        let images = extract_images(&reader).expect("extract");
        let base = tempfile::tempdir().expect("tempdir");

        let paths = save_images(&images, base.path()).expect("save");

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|path| path.parent().and_then(Path::parent) == Some(base.path())));
        assert_eq!(std::fs::read(&paths[0]).expect("read"), test_support::FAKE_JPEG);
        assert!(save_images(&[], base.path()).expect("empty").is_empty());
    }
}
