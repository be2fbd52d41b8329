//! In-memory model of the hosting status page
//!
//! The page is parsed once into an owned snapshot: the list items the prober
//! scans, and every element carrying an `id` so results can be written back
//! by id. Nothing here touches the network except [`loader`].

pub mod discovery;
pub mod loader;

pub use discovery::discover_targets;
pub use loader::load_page;

use crate::defaults::{ANCHOR_SELECTOR, LIST_ITEM_SELECTOR, MARKER_ID_PREFIX};
use crate::error::{AppError, Result};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Text color applied to a marker element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Healthy,
    Warning,
    Alert,
}

impl MarkerColor {
    /// CSS color value written into the element's inline style
    pub fn css(&self) -> &'static str {
        match self {
            MarkerColor::Healthy => "#52c41a",
            MarkerColor::Warning => "#faad14",
            MarkerColor::Alert => "#ff4d4f",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Inline style written by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: MarkerColor,
    pub font_weight: FontWeight,
}

impl MarkerStyle {
    /// `style` attribute value equivalent to this style
    pub fn to_css(&self) -> String {
        format!("color: {}; font-weight: {};", self.color.css(), self.font_weight.css())
    }
}

/// An element of the page addressable by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerElement {
    pub id: String,
    pub tag: String,
    pub text: String,
    /// `None` until the renderer has touched the element
    pub style: Option<MarkerStyle>,
}

/// One `li` under the list container, as found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `href` of the first anchor inside the item
    pub anchor_href: Option<String>,
    /// Id of the first marker element inside the item
    pub marker_id: Option<String>,
}

/// Access to page elements by id, the only thing rendering needs
pub trait ElementLookup {
    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut MarkerElement>;
}

/// Parsed status page
#[derive(Debug, Clone)]
pub struct PageDocument {
    location: Url,
    list_items: Vec<ListItem>,
    elements: Vec<MarkerElement>,
    index: HashMap<String, usize>,
}

impl PageDocument {
    /// Parse page markup; `location` is where the page is served from
    pub fn parse(html: &str, location: Url) -> Result<Self> {
        let document = Html::parse_document(html);

        let item_selector = selector(LIST_ITEM_SELECTOR)?;
        let anchor_selector = selector(ANCHOR_SELECTOR)?;
        let marker_selector = selector(&format!("i[id^=\"{}\"]", MARKER_ID_PREFIX))?;
        let id_selector = selector("[id]")?;

        let list_items = document
            .select(&item_selector)
            .map(|item| ListItem {
                anchor_href: item
                    .select(&anchor_selector)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string),
                marker_id: item
                    .select(&marker_selector)
                    .next()
                    .and_then(|i| i.value().id())
                    .map(str::to_string),
            })
            .collect();

        let mut elements = Vec::new();
        let mut index = HashMap::new();
        for element in document.select(&id_selector) {
            let Some(id) = element.value().id() else {
                continue;
            };
            // First element wins for duplicate ids, as with getElementById.
            if index.contains_key(id) {
                continue;
            }
            index.insert(id.to_string(), elements.len());
            elements.push(MarkerElement {
                id: id.to_string(),
                tag: element.value().name().to_string(),
                text: element.text().collect::<String>(),
                style: None,
            });
        }

        Ok(Self {
            location,
            list_items,
            elements,
            index,
        })
    }

    /// Where the page is served from
    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn list_items(&self) -> &[ListItem] {
        &self.list_items
    }

    pub fn element_by_id(&self, id: &str) -> Option<&MarkerElement> {
        self.index.get(id).map(|&i| &self.elements[i])
    }

    /// All id-bearing elements in document order
    pub fn elements(&self) -> &[MarkerElement] {
        &self.elements
    }
}

impl ElementLookup for PageDocument {
    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut MarkerElement> {
        match self.index.get(id) {
            Some(&i) => self.elements.get_mut(i),
            None => None,
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::internal(format!("Bad selector '{}': {:?}", css, e)))
}
