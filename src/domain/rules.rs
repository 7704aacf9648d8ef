// src/domain/rules.rs

//! Field-level parsing rules. Each source's quirks are expressed as data
//! (`CurrencyRule`, `AreaRule`) and applied by small generic functions.

/// How a raw price string is reduced to a monthly amount.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyRule {
    /// Use only the money token sitting right before a "pcm" marker.
    pub pick_pcm_token: bool,
    /// Literal fragments removed, in order.
    pub strip: &'static [&'static str],
    /// Drop everything from the decimal point on.
    pub truncate_decimals: bool,
}

pub const CENTRAL_CURRENCY: CurrencyRule = CurrencyRule {
    pick_pcm_token: false,
    strip: &["PCM, Fees Apply", "pcm", "PCM", "£", ",", " "],
    truncate_decimals: true,
};

pub const STOW_BROS_CURRENCY: CurrencyRule = CurrencyRule {
    pick_pcm_token: false,
    strip: &[" ", "pcm", "PCM", "£", ","],
    truncate_decimals: true,
};

pub const FOXTONS_CURRENCY: CurrencyRule = CurrencyRule {
    pick_pcm_token: true,
    strip: &["£", "pcm", "PCM", ","],
    truncate_decimals: true,
};

/// Bedroom words in precedence order; the first one present wins.
pub const BEDROOM_WORDS: [(&str, i32); 5] = [
    ("Studio", 1),
    ("Four", 4),
    ("Three", 3),
    ("Two", 2),
    ("One", 1),
];

/// Areas recognised in Central addresses, highest priority first.
pub const CENTRAL_AREAS: [&str; 6] = [
    "Wanstead",
    "Walthamstow",
    "Leytonstone",
    "Leyton",
    "Chingford",
    "London",
];

/// Which part of an address names the area.
#[derive(Debug, Clone, Copy)]
pub enum AreaRule {
    /// First entry of the list found in any comma-separated part.
    Priority(&'static [&'static str]),
    LastPart,
    SecondPart,
}

pub fn parse_currency(raw: &str, rule: &CurrencyRule) -> Option<i64> {
    let mut text = if rule.pick_pcm_token {
        pcm_token(raw)?.to_string()
    } else {
        raw.to_string()
    };

    for pattern in rule.strip {
        text = text.replace(pattern, "");
    }

    if rule.truncate_decimals {
        if let Some(dot) = text.find('.') {
            text.truncate(dot);
        }
    }

    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| first_number(text))
}

/// The money token preceding "pcm", or the last token holding a digit.
fn pcm_token(raw: &str) -> Option<&str> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        let lower = token.to_ascii_lowercase();
        if !lower.starts_with("pcm") && lower.ends_with("pcm") && has_digit(token) {
            return Some(token);
        }
        if lower.starts_with("pcm") && i > 0 && has_digit(tokens[i - 1]) {
            return Some(tokens[i - 1]);
        }
    }

    tokens.into_iter().rev().find(|t| has_digit(t))
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// First run of digits (thousands separators allowed) as an integer.
pub fn first_number(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

pub fn parse_bed_count(raw: &str) -> Option<i32> {
    first_number(raw).and_then(|n| i32::try_from(n).ok())
}

pub fn infer_bedrooms(description: &str) -> Option<i32> {
    BEDROOM_WORDS
        .iter()
        .find(|(word, _)| description.contains(word))
        .map(|(_, count)| *count)
}

pub fn extract_area(address: &str, rule: AreaRule) -> Option<String> {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();

    let area = match rule {
        AreaRule::Priority(areas) => areas
            .iter()
            .find(|area| parts.iter().any(|part| part.contains(*area)))
            .map(|area| area.to_string()),
        AreaRule::LastPart => parts.last().map(|p| p.to_string()),
        AreaRule::SecondPart => parts.get(1).map(|p| p.to_string()),
    };

    area.filter(|a| !a.is_empty())
}
