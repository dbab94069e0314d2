use crate::models::SelectOption;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parses an HTML fragment of `<option>` elements the way a browser fills a
/// `<select>` from it.
pub fn parse_options(html: &str) -> Vec<SelectOption> {
    let wrapped = format!("<select>{html}</select>");
    let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(wrapped.as_str());

    let mut options = Vec::new();
    collect_options(&dom.document, &mut options);
    options
}

pub fn render_options(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|option| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                escape(&option.value),
                if option.selected { " selected" } else { "" },
                escape(&option.label)
            )
        })
        .collect()
}

fn collect_options(node: &Handle, options: &mut Vec<SelectOption>) {
    if let NodeData::Element { name, attrs, .. } = &node.data {
        if &*name.local == "option" {
            let attrs = attrs.borrow();
            let attr = |wanted: &str| {
                attrs
                    .iter()
                    .find(|candidate| &*candidate.name.local == wanted)
                    .map(|candidate| String::from(&*candidate.value))
            };

            let mut text = String::new();
            text_content(node, &mut text);
            let label = text.split_ascii_whitespace().collect::<Vec<_>>().join(" ");

            options.push(SelectOption {
                value: attr("value").unwrap_or_else(|| label.clone()),
                selected: attr("selected").is_some(),
                label,
            });
            return;
        }
    }

    for child in node.children.borrow().iter() {
        collect_options(child, options);
    }
}

fn text_content(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                text_content(child, out);
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
