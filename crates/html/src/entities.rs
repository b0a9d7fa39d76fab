/// Named entities this decoder understands. Everything else passes through verbatim.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("rsaquo", '\u{203A}'),
    ("raquo", '\u{00BB}'),
];

const MAX_ENTITY_LEN: usize = 10;

/// Decode a narrow subset of HTML character references.
///
/// Only semicolon-terminated references decode: the names in `NAMED`, `&#NNN;` and `&#xHHH;`
/// when they form a valid Unicode scalar. Anything else is copied unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `input` starts with '&'. Returns the decoded char and the byte length consumed.
fn decode_one(input: &str) -> Option<(char, usize)> {
    let window = &input.as_bytes()[1..input.len().min(MAX_ENTITY_LEN + 2)];
    let semi = window.iter().position(|&b| b == b';')?;
    let body = &input[1..1 + semi];
    let consumed = semi + 2;
    let ch = if let Some(hex) = body.strip_prefix('#').and_then(|b| {
        b.strip_prefix('x').or_else(|| b.strip_prefix('X'))
    }) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        char::from_u32(u32::from_str_radix(hex, 16).ok()?)?
    } else if let Some(dec) = body.strip_prefix('#') {
        if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        char::from_u32(dec.parse().ok()?)?
    } else {
        NAMED.iter().find(|(name, _)| *name == body)?.1
    };
    Some((ch, consumed))
}
