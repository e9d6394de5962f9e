use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::youtube::TranscriptSnippet;

static TEXT_ELEMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").expect("Invalid text element regex")
});
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)\s*=\s*"([^"]*)""#).expect("Invalid attribute regex")
});
static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));
static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("Invalid entity regex")
});

// HTML 4 named entities plus `apos`. HTML5-only names such as
// `&NotNestedLessLess;` stay literal.

/// U+00A0 ..= U+00FF, in code point order.
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect",
    "uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr",
    "deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot",
    "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil",
    "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
    "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times",
    "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig",
    "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml",
    "eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide",
    "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// U+0391 ..= U+03A9; U+03A2 is unassigned.
const GREEK_UPPER_ENTITIES: [&str; 25] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta",
    "Iota", "Kappa", "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi",
    "Rho", "", "Sigma", "Tau", "Upsilon", "Phi", "Chi", "Psi",
    "Omega",
];

/// U+03B1 ..= U+03C9.
const GREEK_LOWER_ENTITIES: [&str; 25] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    "iota", "kappa", "lambda", "mu", "nu", "xi", "omicron", "pi",
    "rho", "sigmaf", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega",
];

const OTHER_ENTITIES: &[(&str, char)] = &[
    ("quot", '\u{22}'), ("amp", '\u{26}'), ("lt", '\u{3c}'), ("gt", '\u{3e}'),
    ("apos", '\u{27}'), ("OElig", '\u{152}'), ("oelig", '\u{153}'), ("Scaron", '\u{160}'),
    ("scaron", '\u{161}'), ("Yuml", '\u{178}'), ("fnof", '\u{192}'), ("circ", '\u{2c6}'),
    ("tilde", '\u{2dc}'), ("thetasym", '\u{3d1}'), ("upsih", '\u{3d2}'), ("piv", '\u{3d6}'),
    ("ensp", '\u{2002}'), ("emsp", '\u{2003}'), ("thinsp", '\u{2009}'), ("zwnj", '\u{200c}'),
    ("zwj", '\u{200d}'), ("lrm", '\u{200e}'), ("rlm", '\u{200f}'), ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'), ("lsquo", '\u{2018}'), ("rsquo", '\u{2019}'), ("sbquo", '\u{201a}'),
    ("ldquo", '\u{201c}'), ("rdquo", '\u{201d}'), ("bdquo", '\u{201e}'), ("dagger", '\u{2020}'),
    ("Dagger", '\u{2021}'), ("bull", '\u{2022}'), ("hellip", '\u{2026}'), ("permil", '\u{2030}'),
    ("prime", '\u{2032}'), ("Prime", '\u{2033}'), ("lsaquo", '\u{2039}'), ("rsaquo", '\u{203a}'),
    ("oline", '\u{203e}'), ("frasl", '\u{2044}'), ("euro", '\u{20ac}'), ("image", '\u{2111}'),
    ("weierp", '\u{2118}'), ("real", '\u{211c}'), ("trade", '\u{2122}'), ("alefsym", '\u{2135}'),
    ("larr", '\u{2190}'), ("uarr", '\u{2191}'), ("rarr", '\u{2192}'), ("darr", '\u{2193}'),
    ("harr", '\u{2194}'), ("crarr", '\u{21b5}'), ("lArr", '\u{21d0}'), ("uArr", '\u{21d1}'),
    ("rArr", '\u{21d2}'), ("dArr", '\u{21d3}'), ("hArr", '\u{21d4}'), ("forall", '\u{2200}'),
    ("part", '\u{2202}'), ("exist", '\u{2203}'), ("empty", '\u{2205}'), ("nabla", '\u{2207}'),
    ("isin", '\u{2208}'), ("notin", '\u{2209}'), ("ni", '\u{220b}'), ("prod", '\u{220f}'),
    ("sum", '\u{2211}'), ("minus", '\u{2212}'), ("lowast", '\u{2217}'), ("radic", '\u{221a}'),
    ("prop", '\u{221d}'), ("infin", '\u{221e}'), ("ang", '\u{2220}'), ("and", '\u{2227}'),
    ("or", '\u{2228}'), ("cap", '\u{2229}'), ("cup", '\u{222a}'), ("int", '\u{222b}'),
    ("there4", '\u{2234}'), ("sim", '\u{223c}'), ("cong", '\u{2245}'), ("asymp", '\u{2248}'),
    ("ne", '\u{2260}'), ("equiv", '\u{2261}'), ("le", '\u{2264}'), ("ge", '\u{2265}'),
    ("sub", '\u{2282}'), ("sup", '\u{2283}'), ("nsub", '\u{2284}'), ("sube", '\u{2286}'),
    ("supe", '\u{2287}'), ("oplus", '\u{2295}'), ("otimes", '\u{2297}'), ("perp", '\u{22a5}'),
    ("sdot", '\u{22c5}'), ("lceil", '\u{2308}'), ("rceil", '\u{2309}'), ("lfloor", '\u{230a}'),
    ("rfloor", '\u{230b}'), ("lang", '\u{27e8}'), ("rang", '\u{27e9}'), ("loz", '\u{25ca}'),
    ("spades", '\u{2660}'), ("clubs", '\u{2663}'), ("hearts", '\u{2665}'), ("diams", '\u{2666}'),
];

/// Parses a timedtext (`<transcript><text start dur>..</text></transcript>`)
/// document. Elements without text are dropped. Text is entity-decoded at the
/// XML level and again at the HTML level, then stripped of markup.
pub fn parse_timedtext(xml: &str) -> Vec<TranscriptSnippet> {
    TEXT_ELEMENT_REGEX
        .captures_iter(xml)
        .filter_map(|caps| {
            let body = caps.get(2)?.as_str();
            if body.is_empty() {
                return None;
            }

            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let start = attribute(attrs, "start").and_then(|v| v.parse().ok()).unwrap_or(0.0);
            let duration = attribute(attrs, "dur").and_then(|v| v.parse().ok()).unwrap_or(0.0);

            let text = decode_entities(&decode_entities(body));
            let text = HTML_TAG_REGEX.replace_all(&text, "").into_owned();

            Some(TranscriptSnippet {
                text,
                start,
                duration,
            })
        })
        .collect()
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE_REGEX
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Decodes numeric references and named entities. Unknown names are left
/// untouched.
pub fn decode_entities(input: &str) -> String {
    ENTITY_REGEX
        .replace_all(input, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };

            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let in_range = |names: &[&str], first: u32| {
        names
            .iter()
            .position(|candidate| !candidate.is_empty() && *candidate == name)
            .and_then(|offset| char::from_u32(first + offset as u32))
    };

    in_range(&LATIN1_ENTITIES[..], 0xA0)
        .or_else(|| in_range(&GREEK_UPPER_ENTITIES[..], 0x391))
        .or_else(|| in_range(&GREEK_LOWER_ENTITIES[..], 0x3B1))
        .or_else(|| {
            OTHER_ENTITIES
                .iter()
                .find(|(candidate, _)| *candidate == name)
                .map(|(_, c)| *c)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="0" dur="1.54">Hey, this is just a test</text>
<text start="1.54" dur="4.16">this is &lt;i&gt;not&lt;/i&gt; the original transcript</text>
<text start="5.7" dur="3.239"></text>
<text start="8.94" dur="2.1">it&amp;#39;s a test</text>
</transcript>"#;

    #[test]
    fn parses_elements_in_order() {
        let snippets = parse_timedtext(SAMPLE);

        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0].text, "Hey, this is just a test");
        assert_eq!(snippets[0].start, 0.0);
        assert_eq!(snippets[0].duration, 1.54);
        assert_eq!(snippets[2].start, 8.94);
    }

    #[test]
    fn strips_markup_after_decoding() {
        let snippets = parse_timedtext(SAMPLE);
        assert_eq!(snippets[1].text, "this is not the original transcript");
    }

    #[test]
    fn decodes_double_escaped_entities() {
        let snippets = parse_timedtext(SAMPLE);
        assert_eq!(snippets[2].text, "it's a test");
    }

    #[test]
    fn missing_duration_defaults_to_zero() {
        let snippets = parse_timedtext(r#"<transcript><text start="3.5">no dur</text></transcript>"#);

        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].start, 3.5);
        assert_eq!(snippets[0].duration, 0.0);
    }

    #[test]
    fn self_closing_elements_are_skipped() {
        let xml = r#"<transcript><text start="0" dur="1"/><text start="1" dur="2">kept</text></transcript>"#;
        let snippets = parse_timedtext(xml);

        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text, "kept");
        assert_eq!(snippets[0].start, 1.0);
    }

    #[test]
    fn multiline_text_is_kept() {
        let xml = "<transcript><text start=\"0\" dur=\"1\">line one\nline two</text></transcript>";
        assert_eq!(parse_timedtext(xml)[0].text, "line one\nline two");
    }

    #[test]
    fn empty_document_has_no_snippets() {
        assert!(parse_timedtext("<transcript></transcript>").is_empty());
        assert!(parse_timedtext("").is_empty());
    }

    #[test]
    fn decodes_numeric_and_named_entities() {
        assert_eq!(decode_entities("&#39;&#x41;&quot;&amp;"), "'A\"&");
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
    }

    #[test]
    fn decodes_accented_and_symbol_entities() {
        assert_eq!(decode_entities("caf&eacute; &Agrave; &yuml;"), "café À ÿ");
        assert_eq!(decode_entities("&frac12; &sup2; &there4;"), "½ ² ∴");
        assert_eq!(decode_entities("&Sigma;&sigmaf;&omega;"), "Σςω");
        assert_eq!(decode_entities("&euro;&hearts;&trade;"), "€♥™");
    }

    #[test]
    fn double_escaped_accents_in_captions() {
        let xml = r#"<transcript><text start="0" dur="1">r&amp;eacute;sum&amp;eacute;</text></transcript>"#;
        assert_eq!(parse_timedtext(xml)[0].text, "résumé");
    }
}
