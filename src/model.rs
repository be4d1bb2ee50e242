//! Normalized document model.
//!
//! A [`Document`] is the engine's only input: an ordered sequence of pages,
//! each holding ordered elements (images, links, headings, text blocks,
//! tables). Format-specific parsers produce this structure and serialize it
//! back after remediation; the engine never touches raw presentation bytes.
//!
//! Detectors hold a read-only view of the model. The remediation planner is
//! the single writer, mutating element content in place.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s).ok_or_else(|| format!("invalid color: {:?}", s))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Rgb;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a #rrggbb hex color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Rgb, E> {
                Rgb::from_hex(v).ok_or_else(|| E::custom(format!("invalid color: {:?}", v)))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// The kind of an element, used for within-type indexing and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Image,
    Link,
    Heading,
    TextBlock,
    Table,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Image => "image",
            ElementKind::Link => "link",
            ElementKind::Heading => "heading",
            ElementKind::TextBlock => "text_block",
            ElementKind::Table => "table",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An image placed on a page.
///
/// `alt_text` distinguishes three states: `None` means the source format had
/// no alt attribute at all; `Some("")` marks an explicitly decorative image
/// (correct per WCAG, never flagged); any other value is subject to the
/// quality checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Image {
    /// Whether the image is explicitly marked decorative (empty alt value).
    pub fn is_decorative(&self) -> bool {
        matches!(self.alt_text.as_deref(), Some(""))
    }
}

/// A hyperlink with its visible text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub target: String,
}

/// A heading with its declared level (1-6 in well-formed input).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// A run of body text with the presentation attributes the detectors need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
}

/// A data table. Cell content stays with the parser; the engine only needs
/// the structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub rows: usize,
    pub columns: usize,
    #[serde(default)]
    pub has_header_row: bool,
}

/// A single element on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Image(Image),
    Link(Link),
    Heading(Heading),
    TextBlock(TextBlock),
    Table(Table),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Image(_) => ElementKind::Image,
            Element::Link(_) => ElementKind::Link,
            Element::Heading(_) => ElementKind::Heading,
            Element::TextBlock(_) => ElementKind::TextBlock,
            Element::Table(_) => ElementKind::Table,
        }
    }
}

/// A stable reference to an element: page number plus the 1-based ordinal
/// among elements of the same kind on that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub page: usize,
    pub kind: ElementKind,
    pub index: usize,
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}, {} {}", self.page, self.kind, self.index)
    }
}

/// Per-page element tallies, reported as `elements_analyzed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    pub images: usize,
    pub links: usize,
    pub headings: usize,
    pub tables: usize,
    pub text_blocks: usize,
}

impl ElementCounts {
    pub fn total(&self) -> usize {
        self.images + self.links + self.headings + self.tables + self.text_blocks
    }
}

/// A non-fatal problem found while reading the model. Malformed elements are
/// skipped by the detectors, not treated as pipeline failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    pub page: usize,
    pub message: String,
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page, self.message)
    }
}

/// One page (slide) of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Count elements by kind.
    pub fn counts(&self) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for element in &self.elements {
            match element {
                Element::Image(_) => counts.images += 1,
                Element::Link(_) => counts.links += 1,
                Element::Heading(_) => counts.headings += 1,
                Element::Table(_) => counts.tables += 1,
                Element::TextBlock(_) => counts.text_blocks += 1,
            }
        }
        counts
    }

    /// Build an [`ElementRef`] for the element at `position` in this page's
    /// element list.
    pub fn element_ref(&self, position: usize) -> Option<ElementRef> {
        let element = self.elements.get(position)?;
        let kind = element.kind();
        let index = self.elements[..=position]
            .iter()
            .filter(|e| e.kind() == kind)
            .count();
        Some(ElementRef {
            page: self.number,
            kind,
            index,
        })
    }

    /// The text of the nearest heading at or before `position`, falling back
    /// to the page title. Used as context for generated suggestions.
    pub fn heading_context(&self, position: usize) -> Option<&str> {
        self.elements[..position.min(self.elements.len())]
            .iter()
            .rev()
            .find_map(|e| match e {
                Element::Heading(h) if !h.text.trim().is_empty() => Some(h.text.as_str()),
                _ => None,
            })
            .or(self.title.as_deref())
    }
}

/// A full document: the unit of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Find a page by its 1-based number.
    pub fn page(&self, number: usize) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Resolve an element reference to a shared view.
    pub fn resolve(&self, element: ElementRef) -> Option<&Element> {
        self.page(element.page)?
            .elements
            .iter()
            .filter(|e| e.kind() == element.kind)
            .nth(element.index.checked_sub(1)?)
    }

    /// Resolve an element reference for mutation. Used only by the
    /// remediation planner.
    pub fn resolve_mut(&mut self, element: ElementRef) -> Option<&mut Element> {
        let page = self.pages.iter_mut().find(|p| p.number == element.page)?;
        page.elements
            .iter_mut()
            .filter(|e| e.kind() == element.kind)
            .nth(element.index.checked_sub(1)?)
    }

    /// Check per-element well-formedness. Offending elements are reported as
    /// warnings and skipped by the detectors; nothing here aborts a run.
    pub fn validate(&self) -> Vec<AnalysisWarning> {
        let mut warnings = Vec::new();

        for (position, page) in self.pages.iter().enumerate() {
            if page.number != position + 1 {
                warnings.push(AnalysisWarning {
                    page: page.number,
                    message: format!(
                        "page number {} does not match its position {}",
                        page.number,
                        position + 1
                    ),
                });
            }

            for element in &page.elements {
                match element {
                    Element::Heading(h) if !(1..=6).contains(&h.level) => {
                        warnings.push(AnalysisWarning {
                            page: page.number,
                            message: format!(
                                "heading {:?} has invalid level {}, skipped",
                                truncate(&h.text, 40),
                                h.level
                            ),
                        });
                    }
                    Element::Link(l) if l.target.trim().is_empty() => {
                        warnings.push(AnalysisWarning {
                            page: page.number,
                            message: format!(
                                "link {:?} has an empty target, skipped",
                                truncate(&l.text, 40)
                            ),
                        });
                    }
                    Element::TextBlock(t) if t.font_size_pt.map_or(false, |s| s <= 0.0) => {
                        warnings.push(AnalysisWarning {
                            page: page.number,
                            message: format!(
                                "text block {:?} has a non-positive font size, size ignored",
                                truncate(&t.text, 40)
                            ),
                        });
                    }
                    _ => {}
                }
            }
        }

        warnings
    }
}

/// Truncate a string for display, appending an ellipsis when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
