//! XML escaping and Excel's `_xHHHH_` character encoding

/// Escape the five XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Encode cell text for a `<t>` element.
///
/// Characters XML 1.0 cannot carry (and CR, which parsers normalize away)
/// become `_xHHHH_`. An underscore that would otherwise start such a
/// sequence is written as `_x005F_` so it reads back literally.
pub(crate) fn encode_cell_text(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for (i, ch) in s.char_indices() {
        if ch == '_' && starts_with_escape(&s[i..]) {
            encoded.push_str("_x005F_");
        } else if ch == '\r' || !is_xml_char(ch) {
            encoded.push_str(&format!("_x{:04X}_", ch as u32));
        } else {
            encoded.push(ch);
        }
    }
    escape_xml(&encoded)
}

/// Decode Excel's `_xHHHH_` escape sequences
pub(crate) fn decode_cell_text(s: &str) -> String {
    let mut decoded = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        decoded.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let ch = if starts_with_escape(candidate) {
            u32::from_str_radix(&candidate[2..6], 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            None
        };

        match ch {
            Some(ch) => {
                decoded.push(ch);
                rest = &candidate[7..];
            }
            None => {
                decoded.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn starts_with_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

fn is_xml_char(ch: char) -> bool {
    match ch {
        '\t' | '\n' | '\r' => true,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' => true,
        '\u{10000}'..='\u{10FFFF}' => true,
        _ => false,
    }
}
