//! A small element tree for rendering HTML fragments.
//!
//! Server-supplied strings only ever become text nodes or attribute values,
//! both of which are escaped when the tree is serialized.

const VOID_TAGS: [&str; 4] = ["br", "hr", "input", "img"];

/// A node in a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Starts a new element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Adds a valueless attribute such as `disabled`, if `on`.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Looks up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Serializes the node as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// The concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Finds the first element in document order with the given `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let Node::Element(element) = self else {
            return None;
        };
        if element.get_attr("id") == Some(id) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find_by_id(id))
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(text, out, false),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        escape_into(value, out, true);
                        out.push('"');
                    }
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// Serializes a sequence of sibling nodes.
pub fn to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

fn escape_into(raw: &str, out: &mut String, in_attr: bool) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            '\'' if in_attr => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let node: Node = el("td").text("<script>alert('x')</script> & co").into();
        assert_eq!(
            node.to_html(),
            "<td>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</td>"
        );
    }

    #[test]
    fn attributes_are_escaped() {
        let node: Node = el("a").attr("href", "detail.html?id=\"1\" onclick='x'").text("t").into();
        assert_eq!(
            node.to_html(),
            "<a href=\"detail.html?id=&quot;1&quot; onclick=&#39;x&#39;\">t</a>"
        );
    }

    #[test]
    fn void_and_flag_attributes() {
        let node: Node = el("p")
            .child(el("input").id("title").flag("disabled", true).flag("readonly", false))
            .child(el("br"))
            .into();
        assert_eq!(node.to_html(), "<p><input id=\"title\" disabled><br></p>");
    }

    #[test]
    fn find_by_id_searches_descendants() {
        let node: Node = el("form")
            .child(el("div").child(el("input").id("title").attr("value", "Accord")))
            .into();
        assert_eq!(node.find_by_id("title").and_then(|e| e.get_attr("value")), Some("Accord"));
        assert!(node.find_by_id("missing").is_none());
    }
}
