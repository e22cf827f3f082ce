//! Static label registry for well-known object API names.
//!
//! Provides display labels without a metadata round-trip. Used by the
//! renderer to title form panels.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Object metadata: singular display label and plural form.
#[derive(Debug, Clone)]
pub struct ObjectLabel {
    pub label: &'static str,
    pub plural: &'static str,
}

impl ObjectLabel {
    const fn new(label: &'static str, plural: &'static str) -> Self {
        Self { label, plural }
    }
}

/// Returns the label for a known object API name, if any.
pub fn lookup(api_name: &str) -> Option<&'static ObjectLabel> {
    KNOWN_OBJECTS.get(api_name)
}

static KNOWN_OBJECTS: LazyLock<HashMap<&'static str, ObjectLabel>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert("Account", ObjectLabel::new("Account", "Accounts"));
    m.insert("Contact", ObjectLabel::new("Contact", "Contacts"));
    m.insert("Opportunity", ObjectLabel::new("Opportunity", "Opportunities"));
    m.insert("Lead", ObjectLabel::new("Lead", "Leads"));
    m.insert("Case", ObjectLabel::new("Case", "Cases"));
    m.insert("Campaign", ObjectLabel::new("Campaign", "Campaigns"));

    m
});
