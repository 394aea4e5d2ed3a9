use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html};

use crate::dom::PageDom;
use crate::error::StoreError;

/// A saved page parsed with `scraper`.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// A page with no content, for screens whose capture reads no DOM.
    pub fn empty() -> Self {
        Self::parse("<html><body></body></html>")
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let source = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Ok(Self::parse(&source))
    }

    fn all_elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

fn has_all_classes(el: &ElementRef<'_>, wanted: &[&str]) -> bool {
    let classes: Vec<&str> = el.value().classes().collect();
    wanted.iter().all(|w| classes.contains(w))
}

impl PageDom for HtmlPage {
    type Element<'a> = ElementRef<'a>;

    fn get_element_by_id<'a>(&'a self, id: &str) -> Option<ElementRef<'a>> {
        self.all_elements().find(|el| el.value().id() == Some(id))
    }

    fn get_elements_by_class_name<'a>(
        &'a self,
        scope: Option<ElementRef<'a>>,
        names: &str,
    ) -> Vec<ElementRef<'a>> {
        let wanted: Vec<&str> = names.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        match scope {
            // descendants() starts at the scope element itself
            Some(el) => el
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|e| has_all_classes(e, &wanted))
                .collect(),
            None => self
                .all_elements()
                .filter(|e| has_all_classes(e, &wanted))
                .collect(),
        }
    }

    fn get_elements_by_tag_name<'a>(&'a self, scope: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name().eq_ignore_ascii_case(tag))
            .collect()
    }

    fn children<'a>(&'a self, el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        el.children().filter_map(ElementRef::wrap).collect()
    }

    fn class_name<'a>(&'a self, el: ElementRef<'a>) -> String {
        el.value().attr("class").unwrap_or_default().to_string()
    }

    fn text_content<'a>(&'a self, el: ElementRef<'a>) -> String {
        el.text().collect()
    }

    fn src<'a>(&'a self, el: ElementRef<'a>) -> Option<String> {
        el.value().attr("src").map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{class_list, first};

    const PAGE: &str = r#"<html><body>
        <div id="outer" class="box a">
          <span class="box b">one</span>
          <span class="b">two<img src="x.png"></span>
        </div>
    </body></html>"#;

    #[test]
    fn class_queries_need_every_class_and_skip_the_scope() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.get_elements_by_class_name(None, "box").len(), 2);
        assert_eq!(page.get_elements_by_class_name(None, "box b").len(), 1);
        let outer = page.get_element_by_id("outer").unwrap();
        assert_eq!(page.get_elements_by_class_name(Some(outer), "box").len(), 1);
        assert_eq!(page.children(outer).len(), 2);
    }

    #[test]
    fn text_class_and_src() {
        let page = HtmlPage::parse(PAGE);
        let spans = page.get_elements_by_class_name(None, "b");
        let second = first(&spans[1..], "span").unwrap();
        assert_eq!(page.text_content(second), "two");
        assert_eq!(class_list(&page.class_name(spans[0])), vec!["box", "b"]);
        let img = page.get_elements_by_tag_name(second, "IMG");
        assert_eq!(page.src(img[0]).as_deref(), Some("x.png"));
    }
}
