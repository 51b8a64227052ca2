//! Render/search context passed through handlers

/// Ambient context for one block render or search request
///
/// Handlers receive this by reference and treat it as opaque; it exists so
/// context-sensitive repositories (per-shop catalogs, localized fields) have
/// something to key off without widening every handler signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub shop_id: i64,
    pub locale: String,
}

impl Context {
    pub fn new(shop_id: i64, locale: impl Into<String>) -> Self {
        Self {
            shop_id,
            locale: locale.into(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(1, "en-GB")
    }
}
