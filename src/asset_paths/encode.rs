use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped inside a single URL path component.
///
/// Mirrors the component encoding used by browsers: everything except ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )` is percent-encoded.
const PATH_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode every `/`-separated segment of `file_path` independently.
///
/// Output files may contain characters such as `+` or spaces that are not valid in a URL path.
/// The separators themselves are preserved so the result can be appended to a public path.
pub fn urlencode_path(file_path: &str) -> String {
    file_path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
