//! Asset filename parsing for the `name.HHHHHHHH.ext` hash convention.
//!
//! Generated archives fingerprint their static assets by inserting an
//! 8-hex-digit content hash between stem and extension:
//! - `css/documentation-topic.4a21f17c.css` → hash `4a21f17c`
//! - `js/index.0fae3fd6.js` → hash `0fae3fd6`
//!
//! Stripping the hash recovers a stable name for diffing two builds of the
//! same archive. Only the final path component is examined, so a directory
//! named like a hash is left alone.

/// Drop the content-hash extension from a path, if the final component has
/// one. Everything else comes back unchanged.
///
/// - `"css/topic.4a21f17c.css"` → `"css/topic.css"`
/// - `"css/topic.css"` → `"css/topic.css"` (no hash)
/// - `"favicon.ico"` → `"favicon.ico"` (too few components)
/// - `"deadbeef.css"` → `"deadbeef.css"` (hash position needs a stem)
pub fn strip_resource_hash(path: &str) -> String {
    let (dir, name) = split_final_component(path);
    let parts: Vec<&str> = name.split('.').collect();
    let Some(hash_index) = hash_index(&parts) else {
        return path.to_string();
    };
    let kept: Vec<&str> = parts
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != hash_index)
        .map(|(_, p)| *p)
        .collect();
    format!("{dir}{}", kept.join("."))
}

/// Extract the content hash of a path's final component, when present.
pub fn resource_hash(path: &str) -> Option<u32> {
    let (_, name) = split_final_component(path);
    let parts: Vec<&str> = name.split('.').collect();
    let hash = parts[hash_index(&parts)?];
    u32::from_str_radix(hash, 16).ok()
}

/// Remove `[data-v-…]` attribute selectors from a stylesheet.
///
/// Generated stylesheets scope every rule with a per-build attribute
/// selector (`h1[data-v-1b2c3d4e]`); removing them makes two builds'
/// stylesheets comparable. An unterminated selector is kept verbatim rather
/// than guessed at.
pub fn strip_data_attributes(css: &str) -> String {
    let mut pieces = css.split("[data-v-");
    let mut out = String::with_capacity(css.len());
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match piece.find(']') {
            Some(end) => out.push_str(&piece[end + 1..]),
            None => {
                out.push_str("[data-v-");
                out.push_str(piece);
            }
        }
    }
    out
}

fn split_final_component(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => (&path[..=i], &path[i + 1..]),
        None => ("", path),
    }
}

/// Index of the hash in a dot-split file name: the first interior component
/// that is exactly eight hex digits. Stem and extension never qualify.
fn hash_index(parts: &[&str]) -> Option<usize> {
    parts
        .iter()
        .enumerate()
        .take(parts.len().saturating_sub(1))
        .skip(1)
        .find(|(_, p)| p.len() == 8 && p.chars().all(|c| c.is_ascii_hexdigit()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stripped_from_stylesheet_name() {
        assert_eq!(
            strip_resource_hash("documentation-topic.4a21f17c.css"),
            "documentation-topic.css"
        );
    }

    #[test]
    fn directory_prefix_is_preserved() {
        assert_eq!(
            strip_resource_hash("css/index.0fae3fd6.css"),
            "css/index.css"
        );
    }

    #[test]
    fn unhashed_name_is_unchanged() {
        assert_eq!(strip_resource_hash("css/index.css"), "css/index.css");
        assert_eq!(strip_resource_hash("favicon.ico"), "favicon.ico");
    }

    #[test]
    fn hash_needs_exactly_eight_hex_digits() {
        assert_eq!(strip_resource_hash("a.4a21f17.css"), "a.4a21f17.css");
        assert_eq!(strip_resource_hash("a.4a21f17cd.css"), "a.4a21f17cd.css");
        assert_eq!(strip_resource_hash("a.4a21f17g.css"), "a.4a21f17g.css");
    }

    #[test]
    fn stem_that_looks_like_a_hash_is_not_stripped() {
        assert_eq!(strip_resource_hash("deadbeef.css"), "deadbeef.css");
    }

    #[test]
    fn extension_that_looks_like_a_hash_is_not_stripped() {
        assert_eq!(strip_resource_hash("index.deadbeef"), "index.deadbeef");
    }

    #[test]
    fn hash_in_a_directory_name_is_ignored() {
        assert_eq!(
            strip_resource_hash("4a21f17c./index.css"),
            "4a21f17c./index.css"
        );
    }

    #[test]
    fn resource_hash_parses_hex() {
        assert_eq!(
            resource_hash("documentation-topic.4a21f17c.css"),
            Some(0x4a21_f17c)
        );
        assert_eq!(resource_hash("css/index.0fae3fd6.css"), Some(0x0fae_3fd6));
        assert_eq!(resource_hash("css/index.css"), None);
    }

    #[test]
    fn data_attributes_are_removed() {
        let css = "h1[data-v-1b2c3d4e] { color: red }";
        assert_eq!(strip_data_attributes(css), "h1 { color: red }");
    }

    #[test]
    fn multiple_attributes_in_one_sheet() {
        let css = "a[data-v-11111111]:hover,b[data-v-22222222] { x }";
        assert_eq!(strip_data_attributes(css), "a:hover,b { x }");
    }

    #[test]
    fn unterminated_selector_is_left_verbatim() {
        let css = "broken[data-v-123";
        assert_eq!(strip_data_attributes(css), css);
    }

    #[test]
    fn plain_css_passes_through() {
        let css = "p { margin: 0 }";
        assert_eq!(strip_data_attributes(css), css);
    }
}
