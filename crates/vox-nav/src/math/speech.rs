//! Math speech rules
//!
//! Spoken and linear renderings of MathML expressions.

use vox_a11y::collapse_whitespace;
use vox_dom::{DomTree, NodeId};

use super::math_children;

/// Spoken name of an operator symbol; invisible operators speak as ""
pub fn operator_name(symbol: &str) -> Option<&'static str> {
    Some(match symbol {
        "+" => "plus",
        "-" | "\u{2212}" => "minus",
        "=" => "equals",
        "\u{d7}" | "*" | "\u{22c5}" | "\u{b7}" => "times",
        "\u{f7}" | "/" => "divided by",
        "\u{b1}" => "plus or minus",
        "(" => "open paren",
        ")" => "close paren",
        "[" => "open bracket",
        "]" => "close bracket",
        "{" => "open brace",
        "}" => "close brace",
        "|" => "vertical bar",
        "<" => "less than",
        ">" => "greater than",
        "\u{2264}" => "less than or equal to",
        "\u{2265}" => "greater than or equal to",
        "\u{2260}" => "not equal to",
        "\u{2248}" => "approximately equal to",
        "\u{2211}" => "sum",
        "\u{220f}" => "product",
        "\u{222b}" => "integral",
        "\u{221e}" => "infinity",
        "\u{221a}" => "square root",
        "\u{2208}" => "element of",
        "\u{2192}" => "right arrow",
        "!" => "factorial",
        "," => "comma",
        "\u{2062}" | "\u{2061}" | "\u{2063}" | "\u{2064}" => "",
        _ => return None,
    })
}

/// Short description of what kind of math node this is
pub fn math_role_name(tree: &DomTree, id: NodeId) -> &'static str {
    match tree.tag_name(id) {
        Some("mi") => "identifier",
        Some("mn") => "number",
        Some("mo") => "operator",
        Some("mtext") => "text",
        Some("ms") => "string",
        Some("mfrac") => "fraction",
        Some("msqrt") => "square root",
        Some("mroot") => "root",
        Some("msup") => "superscript",
        Some("msub") => "subscript",
        Some("msubsup") => "subscript superscript",
        Some("munder") => "underscript",
        Some("mover") => "overscript",
        Some("munderover") => "underscript overscript",
        Some("mfenced") => "fenced",
        Some("menclose") => "enclosed",
        Some("mtable") => "table",
        Some("mtr") | Some("mlabeledtr") => "row",
        Some("mtd") => "cell",
        Some("mmultiscripts") => "multiscripts",
        Some("math") => "math",
        _ => "",
    }
}

fn token_text(tree: &DomTree, id: NodeId) -> String {
    collapse_whitespace(&tree.text_content(id))
}

fn join(parts: impl IntoIterator<Item = String>) -> String {
    let parts: Vec<String> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    parts.join(" ")
}

/// Spoken rendering of a math subtree
pub fn speak_math(tree: &DomTree, id: NodeId) -> String {
    if let Some(text) = tree.text(id) {
        let text = collapse_whitespace(text);
        return operator_name(&text).map(str::to_string).unwrap_or(text);
    }
    let Some(tag) = tree.tag_name(id) else {
        return String::new();
    };
    let kids: Vec<NodeId> = math_children(tree, id).collect();
    let part = |i: usize| kids.get(i).map(|&k| speak_math(tree, k)).unwrap_or_default();

    match tag {
        "mi" | "mn" | "mtext" | "ms" => token_text(tree, id),
        "mo" => {
            let text = token_text(tree, id);
            operator_name(&text).map(str::to_string).unwrap_or(text)
        }
        "mspace" | "annotation" | "annotation-xml" | "mphantom" | "none" | "mprescripts" => String::new(),
        "mglyph" => tree.attribute(id, "alt").unwrap_or_default().to_string(),
        "mfrac" => format!("{} over {}", part(0), part(1)),
        "msqrt" => format!("square root of {}", join(kids.iter().map(|&k| speak_math(tree, k)))),
        "mroot" => format!("root {} of {}", part(1), part(0)),
        "msup" => match part(1).as_str() {
            "2" => format!("{} squared", part(0)),
            "3" => format!("{} cubed", part(0)),
            sup => format!("{} super {}", part(0), sup),
        },
        "msub" => format!("{} sub {}", part(0), part(1)),
        "msubsup" => format!("{} sub {} super {}", part(0), part(1), part(2)),
        "munder" => format!("{} with {} below", part(0), part(1)),
        "mover" => format!("{} with {} above", part(0), part(1)),
        "munderover" => format!("{} from {} to {}", part(0), part(1), part(2)),
        "mfenced" => {
            let open = tree.attribute(id, "open").unwrap_or("(");
            let close = tree.attribute(id, "close").unwrap_or(")");
            let speak_fence = |f: &str| operator_name(f).map_or_else(|| f.to_string(), str::to_string);
            join(
                std::iter::once(speak_fence(open))
                    .chain(kids.iter().map(|&k| speak_math(tree, k)))
                    .chain(std::iter::once(speak_fence(close))),
            )
        }
        "mtable" => kids
            .iter()
            .enumerate()
            .map(|(i, &row)| format!("row {}: {}", i + 1, speak_math(tree, row)))
            .collect::<Vec<_>>()
            .join(", "),
        "semantics" => part(0),
        _ => join(kids.iter().map(|&k| speak_math(tree, k))),
    }
}

fn wrap(s: String) -> String {
    if s.chars().count() > 1 { format!("({})", s) } else { s }
}

/// Linear text form of a math subtree, used for braille
pub fn linear_math(tree: &DomTree, id: NodeId) -> String {
    if let Some(text) = tree.text(id) {
        return text.trim().to_string();
    }
    let Some(tag) = tree.tag_name(id) else {
        return String::new();
    };
    let kids: Vec<NodeId> = math_children(tree, id).collect();
    let part = |i: usize| kids.get(i).map(|&k| linear_math(tree, k)).unwrap_or_default();
    let concat = || kids.iter().map(|&k| linear_math(tree, k)).collect::<String>();

    match tag {
        "mi" | "mn" | "mtext" | "ms" => token_text(tree, id),
        "mo" => {
            let text = token_text(tree, id);
            if operator_name(&text) == Some("") { String::new() } else { text }
        }
        "mspace" | "annotation" | "annotation-xml" | "mphantom" | "none" | "mprescripts" => String::new(),
        "mglyph" => tree.attribute(id, "alt").unwrap_or_default().to_string(),
        "mfrac" => format!("{}/{}", wrap(part(0)), wrap(part(1))),
        "msqrt" => format!("\u{221a}({})", concat()),
        "mroot" => format!("\u{221a}[{}]({})", part(1), part(0)),
        "msup" | "mover" => format!("{}^{}", part(0), wrap(part(1))),
        "msub" | "munder" => format!("{}_{}", part(0), wrap(part(1))),
        "msubsup" | "munderover" => format!("{}_{}^{}", part(0), wrap(part(1)), wrap(part(2))),
        "mfenced" => {
            let open = tree.attribute(id, "open").unwrap_or("(");
            let close = tree.attribute(id, "close").unwrap_or(")");
            let separator = tree.attribute(id, "separators").unwrap_or(",").trim();
            let inner: Vec<String> = kids.iter().map(|&k| linear_math(tree, k)).collect();
            format!("{}{}{}", open, inner.join(separator), close)
        }
        "semantics" => part(0),
        _ => concat(),
    }
}
