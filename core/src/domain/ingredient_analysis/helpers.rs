/// Splits a free-text ingredient list into individual ingredient names.
///
/// Commas, semicolons and line breaks separate entries. A leading
/// "Ingredients:" label is dropped and duplicate names (case-insensitive) are
/// kept only once, in first-seen order.
pub fn split_ingredients(text: &str) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    let mut names = Vec::new();

    for part in text.split([',', ';', '\n']) {
        let name = strip_label(part.trim()).trim();
        if name.is_empty() {
            continue;
        }

        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }

        seen.push(key);
        names.push(name.to_string());
    }

    names
}

fn strip_label(part: &str) -> &str {
    match part.split_once(':') {
        Some((label, rest)) if label.trim().eq_ignore_ascii_case("ingredients") => rest,
        _ => part,
    }
}
