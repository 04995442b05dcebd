use web_sys as web;

use wheel_core::SpinResult;

use crate::constants::{HIDDEN_CLASS, RESULT_ELEMENT_ID};

/// Show the winning segment in `#wheel-result`, when the page has one.
pub fn show_result(document: &web::Document, result: &SpinResult) {
    if let Some(el) = document.get_element_by_id(RESULT_ELEMENT_ID) {
        el.set_text_content(Some(&result_text(result)));
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
}

pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(RESULT_ELEMENT_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
}

fn result_text(result: &SpinResult) -> String {
    let label = if result.segment.label.is_empty() {
        &result.segment.id
    } else {
        &result.segment.label
    };
    if result.segment.value.is_empty() {
        label.to_string()
    } else {
        format!("{} ({})", label, result.segment.value)
    }
}
