use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::EnhanceError;

pub fn require<T>(value: Option<T>, anchor: &'static str) -> Result<T, EnhanceError> {
    value.ok_or(EnhanceError::MissingAnchor(anchor))
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query_all_within(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn children(element: &Element) -> Vec<HtmlElement> {
    let collection = element.children();

    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn dataset_value(element: &HtmlElement, key: &str) -> Option<String> {
    element.dataset().get(key)
}

pub fn set_display(element: &HtmlElement, value: &str) {
    let _ = element.style().set_property("display", value);
}

pub fn set_class(element: &Element, class: &str, present: bool) {
    let _ = element.class_list().toggle_with_force(class, present);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}
