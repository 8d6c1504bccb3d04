//! Text formatting applied to string values before they are handed out.
//!
//! Plugin authors write colours in config files with the ampersand shorthand
//! (`&aGreen &lbold`, `&#ff8800orange`).  The host's chat renderer only
//! understands the section-sign form (`§a`, `§x§f§f§8§8§0§0`), so every
//! string read through a store passes through a [`TextFormatter`] first.
//!
//! | Input        | Output                 |
//! |--------------|------------------------|
//! | `&a`, `&A`   | `§a`                   |
//! | `&l`         | `§l`                   |
//! | `&#FF8800`   | `§x§f§f§8§8§0§0`       |
//! | `&z`, `& `   | unchanged              |

/// The colour-code prefix understood by the host's chat renderer.
pub const SECTION_SIGN: char = '§';

/// The colour-code prefix written by humans in config files.
pub const ALT_COLOR_CHAR: char = '&';

/// Single-character legacy codes: colours `0-9a-f`, styles `k-o`, reset `r`.
const LEGACY_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRr";

/// Transforms raw string values read from a document.
pub trait TextFormatter: Send + Sync {
    fn format(&self, raw: &str) -> String;
}

/// Translates `&` colour codes and `&#RRGGBB` hex colours.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyColorFormatter;

impl TextFormatter for LegacyColorFormatter {
    fn format(&self, raw: &str) -> String {
        translate_color_codes(raw)
    }
}

/// Returns strings unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl TextFormatter for PlainText {
    fn format(&self, raw: &str) -> String {
        raw.to_string()
    }
}

impl<F> TextFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Rewrites `&`-prefixed colour codes into their `§` form.
pub fn translate_color_codes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == ALT_COLOR_CHAR {
            if let Some(digits) = hex_color_at(&chars, i + 1) {
                out.push(SECTION_SIGN);
                out.push('x');
                for digit in digits {
                    out.push(SECTION_SIGN);
                    out.push(digit.to_ascii_lowercase());
                }
                // '&' + '#' + six digits
                i += 8;
                continue;
            }
            if let Some(&code) = chars.get(i + 1) {
                if LEGACY_CODES.contains(code) {
                    out.push(SECTION_SIGN);
                    out.push(code.to_ascii_lowercase());
                    i += 2;
                    continue;
                }
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

/// Returns the six hex digits of a `#RRGGBB` sequence starting at `start`.
fn hex_color_at(chars: &[char], start: usize) -> Option<&[char]> {
    if chars.get(start) != Some(&'#') {
        return None;
    }
    let digits = chars.get(start + 1..start + 7)?;
    digits
        .iter()
        .all(char::is_ascii_hexdigit)
        .then_some(digits)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
