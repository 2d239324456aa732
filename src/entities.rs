//! HTML character reference decoding for caption text.
//!
//! Caption providers deliver text with markup-escaped characters (`&amp;`, `&#39;`, ...).
//! We resolve them with an explicit table instead of relying on a markup engine.

use std::borrow::Cow;

/// Longest reference body we look at between `&` and `;`.
const MAX_REFERENCE_LEN: usize = 32;

static NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("iexcl", '¡'),
    ("cent", '¢'),
    ("pound", '£'),
    ("euro", '€'),
    ("yen", '¥'),
    ("sect", '§'),
    ("copy", '©'),
    ("reg", '®'),
    ("trade", '™'),
    ("deg", '°'),
    ("plusmn", '±'),
    ("micro", 'µ'),
    ("para", '¶'),
    ("middot", '·'),
    ("laquo", '«'),
    ("raquo", '»'),
    ("iquest", '¿'),
    ("times", '×'),
    ("divide", '÷'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("sbquo", '‚'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("bdquo", '„'),
    ("hellip", '…'),
    ("bull", '•'),
    ("prime", '′'),
    ("Prime", '″'),
    ("frac12", '½'),
    ("frac14", '¼'),
    ("frac34", '¾'),
    ("Agrave", 'À'),
    ("Aacute", 'Á'),
    ("Acirc", 'Â'),
    ("Atilde", 'Ã'),
    ("Auml", 'Ä'),
    ("Ccedil", 'Ç'),
    ("Egrave", 'È'),
    ("Eacute", 'É'),
    ("Ecirc", 'Ê'),
    ("Iacute", 'Í'),
    ("Ntilde", 'Ñ'),
    ("Oacute", 'Ó'),
    ("Ouml", 'Ö'),
    ("Uacute", 'Ú'),
    ("Uuml", 'Ü'),
    ("szlig", 'ß'),
    ("agrave", 'à'),
    ("aacute", 'á'),
    ("acirc", 'â'),
    ("atilde", 'ã'),
    ("auml", 'ä'),
    ("ccedil", 'ç'),
    ("egrave", 'è'),
    ("eacute", 'é'),
    ("ecirc", 'ê'),
    ("euml", 'ë'),
    ("igrave", 'ì'),
    ("iacute", 'í'),
    ("icirc", 'î'),
    ("iuml", 'ï'),
    ("ntilde", 'ñ'),
    ("ograve", 'ò'),
    ("oacute", 'ó'),
    ("ocirc", 'ô'),
    ("otilde", 'õ'),
    ("ouml", 'ö'),
    ("ugrave", 'ù'),
    ("uacute", 'ú'),
    ("ucirc", 'û'),
    ("uuml", 'ü'),
];

/// Decode HTML character references in `text`.
///
/// Handles named references from the table above plus decimal (`&#39;`) and hexadecimal
/// (`&#x27;`) numeric references. A reference must end with `;`. Unknown names and anything
/// that doesn't parse are kept verbatim; numeric references to invalid code points become
/// U+FFFD. Text without `&` is returned borrowed.
pub fn decode(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match resolve(after) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Resolve the reference at the start of `s` (the text right after `&`).
///
/// Returns the decoded char and how many bytes of `s` it used, including the `;`.
fn resolve(s: &str) -> Option<(char, usize)> {
    let window = &s[..floor_char_boundary(s, MAX_REFERENCE_LEN + 1)];
    let semi = window.find(';')?;
    let body = &s[..semi];

    let ch = if let Some(num) = body.strip_prefix('#') {
        decode_numeric(num)?
    } else {
        NAMED
            .iter()
            .find(|(name, _)| *name == body)
            .map(|(_, ch)| *ch)?
    };

    Some((ch, semi + 1))
}

fn decode_numeric(num: &str) -> Option<char> {
    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()
        }
        None if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) => num.parse().ok(),
        _ => return None,
    };

    // Overflowing digit strings are still references; they just point nowhere.
    let ch = code
        .filter(|&c| c != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Some(ch)
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut i = max;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed_untouched() {
        let decoded = decode("hello world");
        assert!(matches!(decoded, Cow::Borrowed("hello world")));
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode("A &amp; B"), "A & B");
        assert_eq!(decode("&lt;i&gt;hi&lt;/i&gt;"), "<i>hi</i>");
        assert_eq!(decode("&quot;caf&eacute;&quot;"), "\"café\"");
        assert_eq!(decode("wait&hellip;"), "wait…");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode("it&#39;s"), "it's");
        assert_eq!(decode("it&#x27;s"), "it's");
        assert_eq!(decode("&#X1F600;"), "😀");
    }

    #[test]
    fn invalid_code_points_become_replacement_char() {
        assert_eq!(decode("&#0;"), "\u{fffd}");
        assert_eq!(decode("&#xD800;"), "\u{fffd}");
        assert_eq!(decode("&#99999999999;"), "\u{fffd}");
    }

    #[test]
    fn unknown_or_unterminated_references_are_kept() {
        assert_eq!(decode("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(decode("&bogus;"), "&bogus;");
        assert_eq!(decode("&amp"), "&amp");
        assert_eq!(decode("&#;"), "&#;");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode("trailing &"), "trailing &");
    }

    #[test]
    fn only_one_level_is_decoded() {
        assert_eq!(decode("&amp;lt;"), "&lt;");
    }

    #[test]
    fn decoding_decoded_text_is_a_no_op() {
        for input in ["A &amp; B", "it&#39;s &quot;fine&quot;", "no refs", "5 &lt; 6 & 7"] {
            let once = decode(input).into_owned();
            assert_eq!(decode(&once), once, "input: {input}");
        }
    }

    #[test]
    fn handles_multibyte_text_around_references() {
        assert_eq!(decode("日本語 &amp; 中文"), "日本語 & 中文");
        assert_eq!(decode("&日本語日本語;"), "&日本語日本語;");
    }
}
