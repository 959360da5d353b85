//! The page a set of components lives on: its `<meta>` entries, the body
//! container that transient elements such as the loading spinner are added to,
//! and the page's alert manager.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use maud::{Markup, html};

use crate::alert::AlertManager;

/// The `<meta>` name holding the CSRF token value.
pub const CSRF_TOKEN_META: &str = "_csrf";
/// The `<meta>` name holding the header the CSRF token is sent in.
pub const CSRF_HEADER_META: &str = "_csrf_header";

/// Named `<meta>` entries of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    entries: BTreeMap<String, String>,
}

impl PageMeta {
    /// A page without any metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry `name`.
    pub fn with(mut self, name: &str, content: &str) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace the entry `name`.
    pub fn insert(&mut self, name: &str, content: &str) {
        self.entries.insert(name.to_owned(), content.to_owned());
    }

    /// The content of the entry `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// The entries as `<meta name=.. content=..>` tags.
    pub fn render(&self) -> Markup {
        html! {
            @for (name, content) in &self.entries {
                meta name=(name) content=(content);
            }
        }
    }
}

/// The CSRF token and header name published by the backend in the page
/// metadata. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfMeta {
    /// The token value.
    pub token: Option<String>,
    /// The name of the request header the token is sent in.
    pub header_name: Option<String>,
}

impl CsrfMeta {
    /// Read the token and header name from `meta`.
    pub fn from_page_meta(meta: &PageMeta) -> Self {
        Self {
            token: meta.get(CSRF_TOKEN_META).map(str::to_owned),
            header_name: meta.get(CSRF_HEADER_META).map(str::to_owned),
        }
    }

    /// The `(header name, token)` pair, only if both are present.
    pub fn header(&self) -> Option<(&str, &str)> {
        match (&self.header_name, &self.token) {
            (Some(header_name), Some(token)) => Some((header_name, token)),
            _ => None,
        }
    }
}

/// A child element of a [Container].
#[derive(Debug, Clone)]
pub struct Element {
    /// The element's `id` attribute.
    pub id: Option<String>,
    /// The element's `class` attribute.
    pub class: String,
    /// The markup inside the element.
    pub content: Markup,
}

/// An element holding an ordered list of child elements.
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    children: Vec<Element>,
}

impl Container {
    /// An empty container with the given `id`.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            children: Vec::new(),
        }
    }

    /// The container's `id` attribute.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add `element` after the existing children.
    pub fn append(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Add `element` before the existing children.
    pub fn prepend(&mut self, element: Element) {
        self.children.insert(0, element);
    }

    /// Remove and return the first child with the given `id`.
    pub fn remove_first_by_id(&mut self, id: &str) -> Option<Element> {
        let position = self
            .children
            .iter()
            .position(|child| child.id.as_deref() == Some(id))?;

        Some(self.children.remove(position))
    }

    /// Whether any child has the given `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.count_id(id) > 0
    }

    /// The number of children with the given `id`.
    pub fn count_id(&self, id: &str) -> usize {
        self.children
            .iter()
            .filter(|child| child.id.as_deref() == Some(id))
            .count()
    }

    /// The children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The container and its children as HTML.
    pub fn render(&self) -> Markup {
        html! {
            div id=(self.id) {
                @for child in &self.children {
                    div id=[child.id.as_deref()] class=(child.class) { (child.content) }
                }
            }
        }
    }
}

/// A handle to a page shared by the components placed on it.
///
/// Cloning the handle does not copy the page.
#[derive(Debug, Clone)]
pub struct Page {
    meta: Arc<PageMeta>,
    body: Arc<Mutex<Container>>,
    alerts: AlertManager,
}

impl Page {
    /// Set up a page with the given metadata.
    ///
    /// The alert container is created straight away, which is when the
    /// browser page would run its load handler.
    pub fn new(meta: PageMeta) -> Self {
        let alerts = AlertManager::new();
        alerts.init();

        Self {
            meta: Arc::new(meta),
            body: Arc::new(Mutex::new(Container::new("page-body"))),
            alerts,
        }
    }

    /// The page metadata.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// The CSRF token and header name published in the page metadata.
    pub fn csrf(&self) -> CsrfMeta {
        CsrfMeta::from_page_meta(&self.meta)
    }

    /// The page's alert manager.
    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    /// Run `f` with exclusive access to the body container.
    pub fn with_body<R>(&self, f: impl FnOnce(&mut Container) -> R) -> R {
        let mut body = self.body.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut body)
    }

    /// The alert container followed by the body's children.
    pub fn render_body(&self) -> Markup {
        html! {
            (self.alerts.render())
            (self.with_body(|body| body.render()))
        }
    }
}
