//! Form Validation
//!
//! Submissions are handled in-page: every `[required]` field must have
//! non-blank content, otherwise nothing is submitted. Required fields also
//! re-check themselves on blur.

use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;
use crate::notify::Severity;

const ERROR_CLASS: &str = "error";
const BLUR_CHECKED: &str = "input[required], select[required], textarea[required]";

pub fn init<V: View>(page: &Page<V>) {
    for form in page.view.query_all("form") {
        let ctx = page.clone();
        let target = form.clone();
        page.view.listen(
            &form,
            Trigger::Submit,
            DefaultAction::Suppress,
            handler(move |_| submit(&ctx, &target)),
        );
    }

    for field in page.view.query_all(BLUR_CHECKED) {
        let view = page.view.clone();
        let target = field.clone();
        page.view.listen(
            &field,
            Trigger::Blur,
            DefaultAction::Keep,
            handler(move |_| {
                mark_field(&view, &target);
            }),
        );
    }
}

/// Sync the field's error marker with its content; true when filled
fn mark_field<V: View>(view: &V, field: &V::Node) -> bool {
    let filled = !view.value(field).trim().is_empty();
    if filled {
        view.remove_class(field, ERROR_CLASS);
    } else {
        view.add_class(field, ERROR_CLASS);
    }
    filled
}

fn submit<V: View>(page: &Page<V>, form: &V::Node) {
    let empty = page
        .view
        .query_all_in(form, "[required]")
        .iter()
        .filter(|field| !mark_field(&page.view, field))
        .count();

    if empty == 0 {
        page.notify("Form submitted successfully!", Severity::Success);
        page.view.reset_form(form);
    } else {
        page.notify("Please fill in all required fields", Severity::Error);
    }
}
