use std::sync::OnceLock;

use regex::Regex;

/// Replace `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("value") }}` substitutes the default when the
/// variable is unset; a placeholder without a default errors instead.
/// Comment lines pass through untouched so commented-out secrets do not
/// block loading.
pub fn interpolate(raw: &str) -> Result<String, String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    });

    let mut out = String::with_capacity(raw.len());

    for (index, line) in raw.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        if line.trim_start().starts_with('#') {
            out.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for captures in placeholder.captures_iter(line) {
            let whole = captures.get(0).expect("capture 0 is the whole match");
            let name = &captures[1];

            out.push_str(&line[cursor..whole.start()]);

            match std::env::var(name) {
                Ok(value) => out.push_str(&value),
                Err(_) => match captures.get(2) {
                    Some(default) => out.push_str(default.as_str()),
                    None => return Err(format!("environment variable not set: `{name}`")),
                },
            }

            cursor = whole.end();
        }
        out.push_str(&line[cursor..]);
    }

    if raw.ends_with('\n') {
        out.push('\n');
    }

    Ok(out)
}
