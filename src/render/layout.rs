//! Cursor-based page layout primitives.
//!
//! Every primitive takes the current cursor and returns the advanced one,
//! inserting page breaks when the content would cross the bottom margin.
//! All text passes through the sanitizer before measurement, so wrap
//! geometry and drawn glyphs always agree.

use super::canvas::{DocumentBuilder, Rect};
use super::metrics::{text_width, wrap_text};
use super::theme::{
    Font, Rgb, ACCENT, BOTTOM_MARGIN, BOX_FILL, CONCLUSION_FILL, CONTENT_WIDTH, INK, LINE_HEIGHT,
    MUTED, PAGE_HEIGHT, SIDE_MARGIN, TOP_MARGIN,
};
use crate::model::{ImageLayout, ImageMode, TeamMember};
use crate::sanitize::sanitize;

/// Body text size in points.
const BODY_SIZE: f64 = 11.0;

/// Gap appended after a title block.
const TITLE_GAP: f64 = 6.0;

/// Inset padding inside filled boxes.
const BOX_PADDING: f64 = 10.0;

/// Team card grid geometry.
const CARD_COLUMNS: usize = 3;
const CARD_HEIGHT: f64 = 64.0;
const CARD_GAP: f64 = 10.0;

/// The write position: which page, and how far down it (top-down points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f64,
}

/// Layout primitives over a [`DocumentBuilder`].
pub struct LayoutEngine<'a> {
    builder: &'a mut DocumentBuilder,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(builder: &'a mut DocumentBuilder) -> Self {
        Self { builder }
    }

    pub fn builder(&mut self) -> &mut DocumentBuilder {
        self.builder
    }

    /// Open a fresh page and place the cursor at the top margin.
    pub fn start_page(&mut self) -> Cursor {
        let page = self.builder.new_page();
        Cursor {
            page,
            y: TOP_MARGIN,
        }
    }

    /// The universal overflow guard: break to a new page if `needed`
    /// points would cross the bottom margin.
    pub fn page_break_if_needed(&mut self, cursor: Cursor, needed: f64) -> Cursor {
        if cursor.y + needed > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.start_page()
        } else {
            cursor
        }
    }

    /// Word-wrap and draw text at `x`, breaking pages per line.
    pub fn wrapped_text(
        &mut self,
        cursor: Cursor,
        text: &str,
        x: f64,
        max_width: f64,
        size: f64,
        font: Font,
        color: Rgb,
    ) -> Cursor {
        let clean = sanitize(text);
        let line_height = size * LINE_HEIGHT;
        let mut cursor = cursor;
        for line in wrap_text(&clean, font, size, max_width) {
            cursor = self.page_break_if_needed(cursor, line_height);
            self.builder
                .text(cursor.page, x, cursor.y + size, font, size, color, &line);
            cursor.y += line_height;
        }
        cursor
    }

    /// Draw a bold title and advance past it plus a fixed gap.
    pub fn title_block(&mut self, cursor: Cursor, title: &str, color: Rgb, size: f64) -> Cursor {
        let mut cursor = self.wrapped_text(
            cursor,
            title,
            SIDE_MARGIN,
            CONTENT_WIDTH,
            size,
            Font::Bold,
            color,
        );
        cursor.y += TITLE_GAP;
        cursor
    }

    /// Draw a horizontal divider across the content width.
    pub fn rule_line(&mut self, cursor: Cursor, color: Rgb) -> Cursor {
        self.builder.rule(
            cursor.page,
            SIDE_MARGIN,
            SIDE_MARGIN + CONTENT_WIDTH,
            cursor.y,
            1.2,
            color,
        );
        Cursor {
            page: cursor.page,
            y: cursor.y + 10.0,
        }
    }

    /// Draw text inside a filled rectangle with inset padding.
    pub fn filled_box(&mut self, cursor: Cursor, text: &str, background: Rgb) -> Cursor {
        let clean = sanitize(text);
        if clean.is_empty() {
            return cursor;
        }
        let inner_width = CONTENT_WIDTH - 2.0 * BOX_PADDING;
        let lines = wrap_text(&clean, Font::Regular, BODY_SIZE, inner_width);
        let line_height = BODY_SIZE * LINE_HEIGHT;
        let height = lines.len() as f64 * line_height + 2.0 * BOX_PADDING;

        let mut cursor = self.page_break_if_needed(cursor, height);
        self.builder.fill_rect(
            cursor.page,
            Rect {
                x: SIDE_MARGIN,
                y: cursor.y,
                width: CONTENT_WIDTH,
                height,
            },
            background,
        );
        let mut text_y = cursor.y + BOX_PADDING;
        for line in &lines {
            self.builder.text(
                cursor.page,
                SIDE_MARGIN + BOX_PADDING,
                text_y + BODY_SIZE,
                Font::Regular,
                BODY_SIZE,
                INK,
                line,
            );
            text_y += line_height;
        }
        cursor.y += height + 12.0;
        cursor
    }

    /// Draw a bullet list, breaking pages before any item that would
    /// cross the bottom margin.
    pub fn bullet_list(&mut self, cursor: Cursor, items: &[String]) -> Cursor {
        let indent = 14.0;
        let text_x = SIDE_MARGIN + indent;
        let text_width_avail = CONTENT_WIDTH - indent;
        let line_height = BODY_SIZE * LINE_HEIGHT;
        let mut cursor = cursor;

        for item in items {
            let clean = sanitize(item);
            if clean.is_empty() {
                continue;
            }
            let lines = wrap_text(&clean, Font::Regular, BODY_SIZE, text_width_avail);
            let needed = lines.len() as f64 * line_height;
            cursor = self.page_break_if_needed(cursor, needed.min(line_height * 3.0));

            self.builder.text(
                cursor.page,
                SIDE_MARGIN + 2.0,
                cursor.y + BODY_SIZE,
                Font::Regular,
                BODY_SIZE,
                ACCENT,
                "\u{2022}",
            );
            for line in &lines {
                cursor = self.page_break_if_needed(cursor, line_height);
                self.builder.text(
                    cursor.page,
                    text_x,
                    cursor.y + BODY_SIZE,
                    Font::Regular,
                    BODY_SIZE,
                    INK,
                    line,
                );
                cursor.y += line_height;
            }
            cursor.y += 4.0;
        }
        cursor
    }

    /// Lay team members out as a fixed three-column card grid.
    ///
    /// Overflow is only checked at the start of each row; a row always
    /// fits once begun.
    pub fn team_cards(&mut self, cursor: Cursor, members: &[TeamMember]) -> Cursor {
        if members.is_empty() {
            return cursor;
        }
        let card_width = (CONTENT_WIDTH - (CARD_COLUMNS as f64 - 1.0) * CARD_GAP) / CARD_COLUMNS as f64;
        let mut cursor = cursor;

        for (i, member) in members.iter().enumerate() {
            let column = i % CARD_COLUMNS;
            if column == 0 {
                if i > 0 {
                    cursor.y += CARD_HEIGHT + CARD_GAP;
                }
                cursor = self.page_break_if_needed(cursor, CARD_HEIGHT);
            }
            let x = SIDE_MARGIN + column as f64 * (card_width + CARD_GAP);
            self.builder.fill_rounded_rect(
                cursor.page,
                Rect {
                    x,
                    y: cursor.y,
                    width: card_width,
                    height: CARD_HEIGHT,
                },
                6.0,
                BOX_FILL,
            );
            let pad = 8.0;
            self.builder.text(
                cursor.page,
                x + pad,
                cursor.y + pad + 10.0,
                Font::Bold,
                10.0,
                INK,
                &truncate_to_width(&sanitize(&member.name), Font::Bold, 10.0, card_width - 2.0 * pad),
            );
            self.builder.text(
                cursor.page,
                x + pad,
                cursor.y + pad + 24.0,
                Font::Regular,
                9.0,
                MUTED,
                &truncate_to_width(&sanitize(&member.role), Font::Regular, 9.0, card_width - 2.0 * pad),
            );
            if let Some(link) = &member.linkedin {
                self.builder.text(
                    cursor.page,
                    x + pad,
                    cursor.y + pad + 40.0,
                    Font::Oblique,
                    7.5,
                    ACCENT,
                    &truncate_to_width(&sanitize(link), Font::Oblique, 7.5, card_width - 2.0 * pad),
                );
            }
        }
        cursor.y += CARD_HEIGHT + 12.0;
        cursor
    }

    /// Draw a conclusion remark in a rounded box.
    pub fn conclusion_box(&mut self, cursor: Cursor, text: &str) -> Cursor {
        let clean = sanitize(text);
        if clean.is_empty() {
            return cursor;
        }
        let pad = 12.0;
        let inner_width = CONTENT_WIDTH - 2.0 * pad;
        let lines = wrap_text(&clean, Font::Oblique, BODY_SIZE, inner_width);
        let line_height = BODY_SIZE * LINE_HEIGHT;
        let height = lines.len() as f64 * line_height + 2.0 * pad;

        let mut cursor = self.page_break_if_needed(cursor, height);
        self.builder.fill_rounded_rect(
            cursor.page,
            Rect {
                x: SIDE_MARGIN,
                y: cursor.y,
                width: CONTENT_WIDTH,
                height,
            },
            8.0,
            CONCLUSION_FILL,
        );
        let mut text_y = cursor.y + pad;
        for line in &lines {
            self.builder.text(
                cursor.page,
                SIDE_MARGIN + pad,
                text_y + BODY_SIZE,
                Font::Oblique,
                BODY_SIZE,
                INK,
                line,
            );
            text_y += line_height;
        }
        cursor.y += height + 12.0;
        cursor
    }

    /// Draw a pre-authored visual block: lines ending in ":" are bold
    /// headings, empty lines add vertical gap, everything else wraps as
    /// plain text.
    pub fn heading_aware_block(&mut self, cursor: Cursor, lines: &[&str]) -> Cursor {
        let mut cursor = cursor;
        for line in lines {
            if line.is_empty() {
                cursor.y += 6.0;
            } else if line.ends_with(':') {
                cursor = self.wrapped_text(
                    cursor,
                    line,
                    SIDE_MARGIN,
                    CONTENT_WIDTH,
                    BODY_SIZE,
                    Font::Bold,
                    INK,
                );
            } else {
                cursor = self.wrapped_text(
                    cursor,
                    line,
                    SIDE_MARGIN,
                    CONTENT_WIDTH,
                    BODY_SIZE,
                    Font::Regular,
                    INK,
                );
            }
        }
        cursor
    }

    /// Place a tab image according to its layout hint.
    ///
    /// Inline mode draws in the text flow at the hinted aspect. Full-page
    /// mode dedicates the remainder of the current page to the image and
    /// moves the cursor to a fresh page, so the tab occupies exactly one
    /// extra page.
    pub fn image_block(
        &mut self,
        cursor: Cursor,
        payload: &[u8],
        layout: ImageLayout,
        alt: Option<&str>,
    ) -> Cursor {
        let aspect = if layout.aspect_ratio > 0.0 {
            layout.aspect_ratio
        } else {
            16.0 / 9.0
        };
        match layout.mode {
            ImageMode::Inline => {
                let width = CONTENT_WIDTH;
                let height = width / aspect;
                let mut cursor = self.page_break_if_needed(cursor, height + 16.0);
                let drawn = self.builder.place_image(
                    cursor.page,
                    payload,
                    Rect {
                        x: SIDE_MARGIN,
                        y: cursor.y,
                        width,
                        height,
                    },
                );
                if drawn {
                    cursor.y += height + 4.0;
                    if let Some(alt) = alt {
                        cursor = self.wrapped_text(
                            cursor,
                            alt,
                            SIDE_MARGIN,
                            CONTENT_WIDTH,
                            8.5,
                            Font::Oblique,
                            MUTED,
                        );
                    }
                    cursor.y += 12.0;
                }
                cursor
            }
            ImageMode::FullPage => {
                let available = PAGE_HEIGHT - BOTTOM_MARGIN - cursor.y - 20.0;
                let mut height = available;
                let mut width = height * aspect;
                if width > CONTENT_WIDTH {
                    width = CONTENT_WIDTH;
                    height = width / aspect;
                }
                let x = SIDE_MARGIN + (CONTENT_WIDTH - width) / 2.0;
                let drawn = self.builder.place_image(
                    cursor.page,
                    payload,
                    Rect {
                        x,
                        y: cursor.y,
                        width,
                        height,
                    },
                );
                if !drawn {
                    return cursor;
                }
                if let Some(alt) = alt {
                    let caption = Cursor {
                        page: cursor.page,
                        y: cursor.y + height + 4.0,
                    };
                    self.wrapped_text(
                        caption,
                        alt,
                        SIDE_MARGIN,
                        CONTENT_WIDTH,
                        8.5,
                        Font::Oblique,
                        MUTED,
                    );
                }
                self.start_page()
            }
        }
    }
}

/// Trim a single line to fit `max_width`, appending "..." when cut.
fn truncate_to_width(text: &str, font: Font, size: f64, max_width: f64) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        let mut candidate = out.clone();
        candidate.push(c);
        candidate.push_str("...");
        if text_width(&candidate, font, size) > max_width {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}
