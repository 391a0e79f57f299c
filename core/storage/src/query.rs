//! Drive `q` expression builders.
//!
//! Drive's query grammar quotes string literals with `'` and uses `\` as the
//! escape character. Caller-supplied text is escaped before interpolation so
//! it cannot close the literal and alter the folder constraint. This is not a
//! parameterized query: the Drive API offers none.

/// Fields requested for listing and search results.
pub const LIST_FIELDS: &str =
    "files(id, name, mimeType, modifiedTime, parents, owners(displayName))";

/// Fields requested for single-file metadata.
pub const METADATA_FIELDS: &str =
    "id, name, mimeType, parents, modifiedTime, size, owners(displayName,emailAddress)";

/// Largest page size Drive accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Escape a value for use inside a single-quoted Drive query literal.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Constraint matching direct children of `folder_id`.
pub fn in_folder(folder_id: &str) -> String {
    format!("'{}' in parents", escape_literal(folder_id))
}

/// Name search restricted to direct children of `folder_id`.
pub fn name_contains_in_folder(folder_id: &str, query: &str) -> String {
    format!(
        "name contains '{}' and {}",
        escape_literal(query),
        in_folder(folder_id)
    )
}

/// Clamp a requested page size into the range Drive accepts.
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}
