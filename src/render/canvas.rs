//! Low-level paginated canvas over the lopdf object model.
//!
//! Pages are accumulated as content-stream operation lists with a top-down
//! Y convention (0 at the top of the page); coordinates are flipped to PDF
//! space at emission time. Nothing touches durable storage until the whole
//! document has been assembled and `build` returns.

use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use super::theme::{Font, Rgb, PAGE_HEIGHT, PAGE_WIDTH};

/// A rectangle in top-down page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An in-progress page: raw content-stream operations.
#[derive(Debug, Default)]
struct PageBuffer {
    ops: Vec<Operation>,
}

/// A decoded raster image registered as a shared XObject.
#[derive(Debug)]
struct EmbeddedImage {
    name: String,
    jpeg: Vec<u8>,
    px_width: u32,
    px_height: u32,
}

/// A pending intra-document link annotation.
#[derive(Debug, Clone, Copy)]
struct PendingLink {
    page: usize,
    rect: Rect,
    target_page: usize,
}

/// Accumulates pages, images, and link annotations, then assembles the
/// final `lopdf::Document`.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    pages: Vec<PageBuffer>,
    images: Vec<EmbeddedImage>,
    links: Vec<PendingLink>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank page and return its index.
    pub fn new_page(&mut self) -> usize {
        self.pages.push(PageBuffer::default());
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Draw a single line of text with its baseline at top-down `y`.
    pub fn text(&mut self, page: usize, x: f64, y: f64, font: Font, size: f64, color: Rgb, text: &str) {
        if text.is_empty() {
            return;
        }
        let ops = &mut self.pages[page].ops;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().into()), size.into()],
        ));
        ops.push(Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()]));
        ops.push(Operation::new(
            "Tm",
            vec![
                1.0.into(),
                0.0.into(),
                0.0.into(),
                1.0.into(),
                x.into(),
                (PAGE_HEIGHT - y).into(),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(to_winansi(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Fill a rectangle whose top edge is at top-down `y`.
    pub fn fill_rect(&mut self, page: usize, rect: Rect, color: Rgb) {
        let ops = &mut self.pages[page].ops;
        ops.push(Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()]));
        ops.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                (PAGE_HEIGHT - rect.y - rect.height).into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    /// Fill a rounded rectangle (constant corner radius).
    pub fn fill_rounded_rect(&mut self, page: usize, rect: Rect, radius: f64, color: Rgb) {
        // Bezier circle-quadrant constant.
        const K: f64 = 0.5523;
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
        let x0 = rect.x;
        let x1 = rect.x + rect.width;
        let y0 = PAGE_HEIGHT - rect.y - rect.height; // bottom, PDF space
        let y1 = PAGE_HEIGHT - rect.y; // top, PDF space

        let ops = &mut self.pages[page].ops;
        ops.push(Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()]));
        ops.push(Operation::new("m", vec![(x0 + r).into(), y0.into()]));
        ops.push(Operation::new("l", vec![(x1 - r).into(), y0.into()]));
        ops.push(Operation::new(
            "c",
            vec![
                (x1 - r + K * r).into(), y0.into(),
                x1.into(), (y0 + r - K * r).into(),
                x1.into(), (y0 + r).into(),
            ],
        ));
        ops.push(Operation::new("l", vec![x1.into(), (y1 - r).into()]));
        ops.push(Operation::new(
            "c",
            vec![
                x1.into(), (y1 - r + K * r).into(),
                (x1 - r + K * r).into(), y1.into(),
                (x1 - r).into(), y1.into(),
            ],
        ));
        ops.push(Operation::new("l", vec![(x0 + r).into(), y1.into()]));
        ops.push(Operation::new(
            "c",
            vec![
                (x0 + r - K * r).into(), y1.into(),
                x0.into(), (y1 - r + K * r).into(),
                x0.into(), (y1 - r).into(),
            ],
        ));
        ops.push(Operation::new("l", vec![x0.into(), (y0 + r).into()]));
        ops.push(Operation::new(
            "c",
            vec![
                x0.into(), (y0 + r - K * r).into(),
                (x0 + r - K * r).into(), y0.into(),
                (x0 + r).into(), y0.into(),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    /// Stroke a horizontal rule at top-down `y`.
    pub fn rule(&mut self, page: usize, x1: f64, x2: f64, y: f64, width: f64, color: Rgb) {
        let ops = &mut self.pages[page].ops;
        ops.push(Operation::new("RG", vec![color.r.into(), color.g.into(), color.b.into()]));
        ops.push(Operation::new("w", vec![width.into()]));
        ops.push(Operation::new("m", vec![x1.into(), (PAGE_HEIGHT - y).into()]));
        ops.push(Operation::new("l", vec![x2.into(), (PAGE_HEIGHT - y).into()]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Decode and place a raster image, top edge at top-down `rect.y`.
    ///
    /// A payload the decoder rejects is logged and skipped; the export
    /// continues without it. Returns whether the image was drawn.
    pub fn place_image(&mut self, page: usize, payload: &[u8], rect: Rect) -> bool {
        let decoded = match image::load_from_memory(payload) {
            Ok(img) => img,
            Err(err) => {
                log::warn!("skipping undecodable image payload: {err}");
                return false;
            }
        };
        let rgb = decoded.to_rgb8();
        let (px_width, px_height) = rgb.dimensions();
        let mut jpeg = Vec::new();
        if let Err(err) = JpegEncoder::new_with_quality(&mut jpeg, 85).encode_image(&rgb) {
            log::warn!("skipping image that failed re-encoding: {err}");
            return false;
        }

        let name = format!("Im{}", self.images.len() + 1);
        self.images.push(EmbeddedImage {
            name: name.clone(),
            jpeg,
            px_width,
            px_height,
        });

        let ops = &mut self.pages[page].ops;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.0.into(),
                0.0.into(),
                rect.height.into(),
                rect.x.into(),
                (PAGE_HEIGHT - rect.y - rect.height).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
        true
    }

    /// Register a clickable link from `rect` on `page` to `target_page`.
    pub fn link(&mut self, page: usize, rect: Rect, target_page: usize) {
        self.links.push(PendingLink { page, rect, target_page });
    }

    /// Operations recorded for a page. Exposed for layout assertions.
    pub fn operations(&self, page: usize) -> &[Operation] {
        &self.pages[page].ops
    }

    /// Assemble the final document.
    pub fn build(self, title: &str) -> crate::error::Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_dict = |base: &str| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base,
                "Encoding" => "WinAnsiEncoding",
            }
        };
        let f1 = doc.add_object(font_dict(Font::Regular.base_font()));
        let f2 = doc.add_object(font_dict(Font::Bold.base_font()));
        let f3 = doc.add_object(font_dict(Font::Oblique.base_font()));

        let mut xobjects = Dictionary::new();
        for img in &self.images {
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => img.px_width as i64,
                    "Height" => img.px_height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8i64,
                    "Filter" => "DCTDecode",
                },
                img.jpeg.clone(),
            );
            let id = doc.add_object(stream);
            xobjects.set(img.name.clone(), Object::Reference(id));
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Regular.resource_name() => Object::Reference(f1),
                Font::Bold.resource_name() => Object::Reference(f2),
                Font::Oblique.resource_name() => Object::Reference(f3),
            },
            "XObject" => Object::Dictionary(xobjects),
        });

        // Page ids are allocated up front so link destinations can refer
        // to pages that have not been written yet.
        let page_ids: Vec<_> = self.pages.iter().map(|_| doc.new_object_id()).collect();

        for (index, page) in self.pages.iter().enumerate() {
            let content = Content {
                operations: page.ops.clone(),
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content
                    .encode()
                    .map_err(crate::error::Error::Pdf)?,
            ));

            let mut annots = Vec::new();
            for link in self.links.iter().filter(|l| l.page == index) {
                let target = page_ids[link.target_page];
                let annot_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![
                        link.rect.x.into(),
                        (PAGE_HEIGHT - link.rect.y - link.rect.height).into(),
                        (link.rect.x + link.rect.width).into(),
                        (PAGE_HEIGHT - link.rect.y).into(),
                    ],
                    "Border" => vec![0i64.into(), 0i64.into(), 0i64.into()],
                    "Dest" => vec![Object::Reference(target), "Fit".into()],
                });
                annots.push(Object::Reference(annot_id));
            }

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.0.into(), 0.0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            };
            if !annots.is_empty() {
                page_dict.set("Annots", annots);
            }
            doc.objects
                .insert(page_ids[index], Object::Dictionary(page_dict));
        }

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(to_winansi(title)),
            "Producer" => Object::string_literal("hobson-deck"),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));
        Ok(doc)
    }
}

/// Encode text as WinAnsi bytes. The typographic glyphs WinAnsi squats on
/// in 0x80..0x9F are mapped explicitly (the layout engine draws its bullet
/// glyph directly); anything else outside Latin-1 degrades to '?'.
fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code if code < 256 => code as u8,
            0x20AC => 0x80, // euro
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2022 => 0x95, // bullet
            0x2013 => 0x96,
            0x2014 => 0x97,
            0x2026 => 0x85, // ellipsis
            0x2122 => 0x99, // trademark
            _ => b'?',
        })
        .collect()
}
