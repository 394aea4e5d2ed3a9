//! Document queries used by the scrapers.
//!
//! The extractors only need a handful of DOM operations, so the page is
//! reached through [`PageDom`]. [`crate::html::HtmlPage`] implements it over a
//! parsed HTML document.

use crate::error::ExtractError;

pub trait PageDom {
    type Element<'a>: Copy
    where
        Self: 'a;

    /// `document.getElementById(id)`
    fn get_element_by_id<'a>(&'a self, id: &str) -> Option<Self::Element<'a>>;

    /// `getElementsByClassName(names)` on the document (`scope == None`) or on
    /// an element. Every whitespace-separated class must be present.
    fn get_elements_by_class_name<'a>(
        &'a self,
        scope: Option<Self::Element<'a>>,
        names: &str,
    ) -> Vec<Self::Element<'a>>;

    /// `el.getElementsByTagName(tag)`
    fn get_elements_by_tag_name<'a>(
        &'a self,
        scope: Self::Element<'a>,
        tag: &str,
    ) -> Vec<Self::Element<'a>>;

    /// `el.children` (element children only).
    fn children<'a>(&'a self, el: Self::Element<'a>) -> Vec<Self::Element<'a>>;

    /// `el.className`
    fn class_name<'a>(&'a self, el: Self::Element<'a>) -> String;

    /// `el.textContent`
    fn text_content<'a>(&'a self, el: Self::Element<'a>) -> String;

    /// `el.src`; `None` when the element has no such attribute.
    fn src<'a>(&'a self, el: Self::Element<'a>) -> Option<String>;
}

/// `el.classList`
pub fn class_list(class_name: &str) -> Vec<&str> {
    class_name.split_ascii_whitespace().collect()
}

/// `collection[0]`, failing like a script dereferencing `undefined`.
pub fn first<E: Copy>(found: &[E], what: &str) -> Result<E, ExtractError> {
    found
        .first()
        .copied()
        .ok_or_else(|| ExtractError::MissingElement(what.to_string()))
}

/// `el.children[i]`
pub fn child<'a, D: PageDom + ?Sized>(
    dom: &'a D,
    el: D::Element<'a>,
    i: usize,
) -> Option<D::Element<'a>> {
    dom.children(el).get(i).copied()
}

/// `el.children[i]`, required.
pub fn require_child<'a, D: PageDom + ?Sized>(
    dom: &'a D,
    el: D::Element<'a>,
    i: usize,
    what: &str,
) -> Result<D::Element<'a>, ExtractError> {
    child(dom, el, i).ok_or_else(|| ExtractError::MissingElement(format!("{what}.children[{i}]")))
}
