//! URI component escaping.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone besides ASCII
/// alphanumerics: `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URI component the way browsers' `encodeURIComponent`
/// does (UTF-8, uppercase hex).
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(
            encode_component("a b&c=d?e/f#g"),
            "a%20b%26c%3Dd%3Fe%2Ff%23g"
        );
        assert_eq!(
            encode_component("Name: Ada\nEmail"),
            "Name%3A%20Ada%0AEmail"
        );
        assert_eq!(encode_component("x@y.z"), "x%40y.z");
    }

    #[test]
    fn unreserved_marks_pass_through() {
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode_component("é"), "%C3%A9");
    }
}
