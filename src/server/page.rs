//! Server-rendered submission form.

use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

use crate::record::PlaceCategory;

static TEMPLATES: Lazy<Tera> = Lazy::new(|| load_templates().expect("form template is valid"));

fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("form.html", include_str!("../../templates/form.html"))?;
    Ok(tera)
}

/// Compile the page templates now rather than on the first request.
pub fn preload_templates() {
    Lazy::force(&TEMPLATES);
}

/// Optional single-line inputs, as `(json key, label)`.
const SCALAR_FIELDS: [(&str, &str); 7] = [
    ("tradition", "Tradition"),
    ("period", "Period"),
    ("traditionType", "Tradition type"),
    ("gender", "Gender"),
    ("language", "Language"),
    ("deity", "Deity"),
    ("philosophy", "Philosophy"),
];

#[derive(Serialize)]
struct FieldView {
    key: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct CategoryView {
    label: &'static str,
    input_id: String,
}

/// Render the form page from the place vocabulary.
pub fn render_form_page() -> Result<String, tera::Error> {
    let scalar_fields: Vec<FieldView> = SCALAR_FIELDS
        .iter()
        .map(|&(key, label)| FieldView { key, label })
        .collect();
    let categories: Vec<CategoryView> = PlaceCategory::ALL
        .iter()
        .map(|c| CategoryView {
            label: c.label(),
            input_id: c.input_id(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("scalar_fields", &scalar_fields);
    context.insert("categories", &categories);
    context.insert("version", crate::VERSION);
    TEMPLATES.render("form.html", &context)
}
