//! Inline `style` attribute handling.
//!
//! Declarations keep their source order; setting an existing property replaces it in place,
//! setting it to the empty string removes it (the same contract as `element.style.x = ''`).

// input: "display: none; animation-delay: 0.04s"
// output: vec![("display", "none"), ("animation-delay", "0.04s")]
pub fn parse_declarations(input: &str) -> Vec<(String, String)> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, v.trim().to_string()))
        })
        .collect()
}

pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the new attribute value, or `None` when no declarations remain.
pub(crate) fn with_property(current: Option<&str>, property: &str, value: &str) -> Option<String> {
    let mut declarations = current.map(parse_declarations).unwrap_or_default();
    let property = property.to_ascii_lowercase();
    let value = value.trim();
    match declarations.iter().position(|(k, _)| *k == property) {
        Some(i) if value.is_empty() => {
            declarations.remove(i);
        }
        Some(i) => declarations[i].1 = value.to_string(),
        None if value.is_empty() => {}
        None => declarations.push((property, value.to_string())),
    }
    (!declarations.is_empty()).then(|| serialize_declarations(&declarations))
}

pub(crate) fn property<'a>(current: &'a str, property: &str) -> Option<String> {
    parse_declarations(current)
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(property))
        .map(|(_, v)| v)
}
