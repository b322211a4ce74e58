//! HTML rendering for the converter form and entity pages.

use crate::resolver::INPUT_FIELD;
use crate::store::EntityRecord;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// The converter form, optionally re-rendered with a field error.
pub fn form_page(value: &str, error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!(
            "<div class=\"messages error\" role=\"alert\" data-field=\"{}\">{}</div>\n",
            INPUT_FIELD,
            escape_html(message)
        ),
        None => String::new(),
    };
    let body = format!(
        "<form method=\"post\" action=\"/resolve\">\n\
         <label for=\"{field}\">RDF entity ID or a URL</label>\n\
         {error_html}\
         <input type=\"text\" id=\"{field}\" name=\"{field}\" value=\"{value}\">\n\
         <div class=\"description\">Paste either a RDF entity ID in order to be redirected to the RDF entity page, \
         or a system or aliased RDF entity URL to get the decoded ID of the entity.</div>\n\
         <input type=\"submit\" value=\"Go!\">\n\
         </form>",
        field = INPUT_FIELD,
        error_html = error_html,
        value = escape_html(value),
    );
    layout("RDF entity URI converter", &body)
}

/// A page showing only the decoded identifier.
pub fn identifier_page(id: &str) -> String {
    layout(
        "RDF entity ID",
        &format!("<pre class=\"rdf-entity-id\">{}</pre>", escape_html(id)),
    )
}

pub fn entity_page(entity: &EntityRecord) -> String {
    let title = if entity.label.is_empty() {
        entity.id.as_str()
    } else {
        entity.label.as_str()
    };
    let body = format!(
        "<h1>{}</h1>\n<dl>\n<dt>ID</dt><dd><code>{}</code></dd>\n<dt>Type</dt><dd>{}</dd>\n</dl>",
        escape_html(title),
        escape_html(&entity.id),
        escape_html(&entity.bundle)
    );
    layout(title, &body)
}

pub fn not_found_page() -> String {
    layout("Page not found", "<h1>Page not found</h1>")
}
