//! Page category constants for tab page standardization.
//!
//! Every page rendered inside the shell must declare:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_document_type--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator makes the entity name searchable: copy the id from
//! the browser DOM Inspector, paste into IDE search, and you land in the
//! `domain/a001_document_type/` directory.

/// List of records — table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Use-case wizard / action page (circuit builder, etc.).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// System administration page.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Categories where standard structure (`page__header` + `page__content`) is required.
pub const STANDARD_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_USECASE,
    PAGE_CAT_SYSTEM,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

/// Return true if the category value is recognised.
pub fn is_known_category(cat: &str) -> bool {
    STANDARD_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_document_type--list"));
        assert!(is_valid_page_id("users--system"));
        assert!(!is_valid_page_id("no_separator"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_document_type--"));
    }
}
