//! Widget compiler: design nodes to Flutter widget expressions.
//!
//! Every node kind maps to one widget expression. A fragment's first line is
//! not indented; continuation lines are indented relative to the column the
//! caller places the fragment at, so fragments nest without re-indentation.

use fluttergen_core::{
    border_color_of, color_of, cross_axis_of, font_weight_of, insets_of, length_of,
    letter_spacing_of, main_axis_of, size_of, text_align_of, text_decoration_of, Node,
    NodeKind, NodeTree, ROOT_ID,
};
use tracing::debug;

use crate::dart::{dart_double, dart_number, dart_string, ToDart};
use crate::routes::RouteTable;

/// Zero-size widget used for empty images and unknown nodes.
const EMPTY_WIDGET: &str = "SizedBox.shrink()";

/// Props consulted, in order, for the spacing between container children.
const GAP_PROPS: [&str; 3] = ["gap", "rowGap", "columnGap"];

/// Compiles the nodes of one screen tree.
pub struct WidgetCompiler<'a> {
    tree: &'a NodeTree,
    routes: &'a RouteTable,
}

impl<'a> WidgetCompiler<'a> {
    /// Create a compiler for `tree`; `routes` lists the screens buttons may
    /// navigate to.
    pub fn new(tree: &'a NodeTree, routes: &'a RouteTable) -> Self {
        Self { tree, routes }
    }

    /// Compile the root node. Empty if the tree has no root.
    pub fn compile_root(&self, indent: usize) -> String {
        self.compile(ROOT_ID, indent)
    }

    /// Compile a node and its descendants.
    ///
    /// Returns an empty fragment when `id` is not in the tree.
    pub fn compile(&self, id: &str, indent: usize) -> String {
        let mut path = Vec::new();
        self.compile_node(id, indent, &mut path)
    }

    fn compile_node(&self, id: &str, indent: usize, path: &mut Vec<&'a str>) -> String {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            debug!(id, "skipping dangling node reference");
            return String::new();
        };
        if path.iter().any(|seen| *seen == node.id) {
            debug!(id, "skipping node already on the current path");
            return String::new();
        }

        path.push(node.id.as_str());
        let fragment = match &node.kind {
            NodeKind::Container => self.container(node, indent, path),
            NodeKind::Text => self.text(node, indent),
            NodeKind::Button => self.button(node, indent),
            NodeKind::Input => self.input(node, indent),
            NodeKind::Checkbox => self.checkbox(node, indent),
            NodeKind::Image => self.image(node, indent),
            NodeKind::Table => self.table(node, indent),
            NodeKind::Unknown(tag) => {
                debug!(id, tag = %tag, "unknown node type, emitting placeholder");
                EMPTY_WIDGET.to_string()
            }
        };
        path.pop();
        fragment
    }

    /// Compiled children with gap spacers between them.
    ///
    /// Children that compile to nothing are dropped before spacing, so a
    /// dangling id has the same effect as an id that was never listed.
    fn children(&self, node: &Node, indent: usize, path: &mut Vec<&'a str>) -> Vec<String> {
        let gap = length_of(node.props.first_truthy(&GAP_PROPS), 0.0);
        let compiled: Vec<String> = node
            .children
            .iter()
            .map(|child| self.compile_node(child, indent, path))
            .filter(|fragment| !fragment.is_empty())
            .collect();

        let mut out = Vec::with_capacity(compiled.len() * 2);
        for (index, fragment) in compiled.into_iter().enumerate() {
            // Vertical regardless of flexDirection.
            if index > 0 && gap != 0.0 {
                out.push(format!("SizedBox(height: {})", dart_number(gap)));
            }
            out.push(fragment);
        }
        out
    }

    fn container(&self, node: &Node, indent: usize, path: &mut Vec<&'a str>) -> String {
        let p = &node.props;
        let s = " ".repeat(indent);
        let children = self.children(node, indent + 6, path);

        let mut lines = vec!["Container(".to_string()];
        lines.push(format!("{}  width: {},", s, size_of(p.get("width")).to_dart()));
        lines.push(format!("{}  height: {},", s, size_of(p.get("height")).to_dart()));
        lines.push(format!("{}  padding: {},", s, insets_of(p.get("padding")).to_dart()));
        lines.push(format!("{}  margin: {},", s, insets_of(p.get("margin")).to_dart()));
        lines.push(format!("{}  decoration: BoxDecoration(", s));
        lines.push(format!("{}    color: {},", s, color_of(p.str("background")).to_dart()));
        lines.push(format!(
            "{}    borderRadius: BorderRadius.circular({}),",
            s,
            dart_number(length_of(p.get("borderRadius"), 0.0))
        ));
        lines.push(format!(
            "{}    border: Border.all(color: {}),",
            s,
            border_color_of(p.str("border")).to_dart()
        ));
        lines.push(format!("{}  ),", s));
        lines.push(format!("{}  child: Column(", s));
        lines.push(format!(
            "{}    mainAxisAlignment: {},",
            s,
            main_axis_of(p.str("justifyContent")).to_dart()
        ));
        lines.push(format!(
            "{}    crossAxisAlignment: {},",
            s,
            cross_axis_of(p.str("alignItems")).to_dart()
        ));
        if children.is_empty() {
            lines.push(format!("{}    children: [],", s));
        } else {
            lines.push(format!("{}    children: [", s));
            for child in &children {
                lines.push(format!("{}      {},", s, child));
            }
            lines.push(format!("{}    ],", s));
        }
        lines.push(format!("{}  ),", s));
        lines.push(format!("{})", s));
        lines.join("\n")
    }

    fn text(&self, node: &Node, indent: usize) -> String {
        let p = &node.props;
        let s = " ".repeat(indent);

        let lines = [
            "Text(".to_string(),
            format!("{}  {},", s, dart_string(&p.text_or("text", ""))),
            format!("{}  style: TextStyle(", s),
            format!("{}    fontSize: {},", s, dart_number(length_of(p.get("fontSize"), 14.0))),
            format!("{}    color: {},", s, color_of(p.str("color")).to_dart()),
            format!("{}    fontWeight: {},", s, font_weight_of(p.str("fontWeight")).to_dart()),
            format!("{}    fontFamily: {},", s, dart_string(&p.text_or("fontFamily", "Arial"))),
            format!(
                "{}    decoration: {},",
                s,
                text_decoration_of(p.str("textDecoration")).to_dart()
            ),
            format!(
                "{}    letterSpacing: {},",
                s,
                dart_double(letter_spacing_of(p.get("letterSpacing")))
            ),
            format!("{}  ),", s),
            format!("{}  textAlign: {},", s, text_align_of(p.str("textAlign")).to_dart()),
            format!("{})", s),
        ];
        lines.join("\n")
    }

    fn button(&self, node: &Node, indent: usize) -> String {
        let p = &node.props;
        let s = " ".repeat(indent);

        let on_pressed = match p.str("gotoScreen").and_then(|label| self.routes.route_for(label)) {
            Some(route) => format!(
                "() => Navigator.pushNamed(context, {})",
                dart_string(route)
            ),
            None => "() {}".to_string(),
        };

        let lines = [
            "Padding(".to_string(),
            format!("{}  padding: {},", s, insets_of(p.get("margin")).to_dart()),
            format!("{}  child: ElevatedButton(", s),
            format!("{}    onPressed: {},", s, on_pressed),
            format!("{}    style: ElevatedButton.styleFrom(", s),
            format!("{}      backgroundColor: {},", s, color_of(p.str("background")).to_dart()),
            format!("{}      padding: {},", s, insets_of(p.get("padding")).to_dart()),
            format!("{}      shape: RoundedRectangleBorder(", s),
            format!(
                "{}        borderRadius: BorderRadius.circular({}),",
                s,
                dart_number(length_of(p.get("borderRadius"), 0.0))
            ),
            format!("{}      ),", s),
            format!("{}    ),", s),
            format!("{}    child: Text(", s),
            format!("{}      {},", s, dart_string(&p.text_or("text", "Button"))),
            format!(
                "{}      style: TextStyle(color: {}),",
                s,
                color_of(p.str("color")).to_dart()
            ),
            format!("{}    ),", s),
            format!("{}  ),", s),
            format!("{})", s),
        ];
        lines.join("\n")
    }

    fn input(&self, node: &Node, indent: usize) -> String {
        let p = &node.props;
        let s = " ".repeat(indent);

        let lines = [
            "Padding(".to_string(),
            format!("{}  padding: {},", s, insets_of(p.get("margin")).to_dart()),
            format!("{}  child: TextField(", s),
            format!("{}    decoration: InputDecoration(", s),
            format!("{}      hintText: {},", s, dart_string(&p.text_or("placeholder", ""))),
            format!("{}      contentPadding: {},", s, insets_of(p.get("padding")).to_dart()),
            format!("{}      border: OutlineInputBorder(", s),
            format!(
                "{}        borderRadius: BorderRadius.circular({}),",
                s,
                dart_number(length_of(p.get("borderRadius"), 0.0))
            ),
            format!(
                "{}        borderSide: BorderSide(color: {}),",
                s,
                border_color_of(p.str("border")).to_dart()
            ),
            format!("{}      ),", s),
            format!("{}    ),", s),
            format!("{}  ),", s),
            format!("{})", s),
        ];
        lines.join("\n")
    }

    fn checkbox(&self, node: &Node, indent: usize) -> String {
        let s = " ".repeat(indent);

        let lines = [
            "Row(".to_string(),
            format!("{}  children: [", s),
            format!("{}    Checkbox(value: false, onChanged: (_) {{}}),", s),
            format!("{}    Text({}),", s, dart_string(&node.props.text_or("label", ""))),
            format!("{}  ],", s),
            format!("{})", s),
        ];
        lines.join("\n")
    }

    fn image(&self, node: &Node, indent: usize) -> String {
        let p = &node.props;
        let Some(src) = p.str("src").filter(|src| !src.trim().is_empty()) else {
            return EMPTY_WIDGET.to_string();
        };
        let s = " ".repeat(indent);
        let radius = dart_number(length_of(p.get("borderRadius"), 0.0));

        let lines = [
            "Container(".to_string(),
            format!("{}  width: {},", s, size_of(p.get("width")).to_dart()),
            format!("{}  height: {},", s, size_of(p.get("height")).to_dart()),
            format!("{}  margin: {},", s, insets_of(p.get("margin")).to_dart()),
            format!("{}  padding: {},", s, insets_of(p.get("padding")).to_dart()),
            format!("{}  decoration: BoxDecoration(", s),
            format!("{}    borderRadius: BorderRadius.circular({}),", s, radius),
            format!(
                "{}    border: Border.all(color: {}),",
                s,
                border_color_of(p.str("border")).to_dart()
            ),
            format!("{}  ),", s),
            format!("{}  child: ClipRRect(", s),
            format!("{}    borderRadius: BorderRadius.circular({}),", s, radius),
            format!("{}    child: Image.network(", s),
            format!("{}      {},", s, dart_string(src.trim())),
            format!("{}      fit: BoxFit.cover,", s),
            format!("{}    ),", s),
            format!("{}  ),", s),
            format!("{})", s),
        ];
        lines.join("\n")
    }

    fn table(&self, node: &Node, indent: usize) -> String {
        let s = " ".repeat(indent);

        let lines = [
            "Table(".to_string(),
            format!(
                "{}  border: TableBorder.all(color: {}),",
                s,
                border_color_of(node.props.str("border")).to_dart()
            ),
            format!("{}  children: [", s),
            format!("{}    // fluttergen: table rows are not generated", s),
            format!("{}  ],", s),
            format!("{})", s),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(tree: &NodeTree, routes: &RouteTable) -> String {
        WidgetCompiler::new(tree, routes).compile_root(0)
    }

    fn root() -> Node {
        Node::new(ROOT_ID, NodeKind::Container)
    }

    #[test]
    fn test_empty_root_container() {
        let tree = NodeTree::new().with_node(root());
        let code = compile(&tree, &RouteTable::default());
        assert_eq!(
            code,
            "Container(
  width: null,
  height: null,
  padding: EdgeInsets.all(0),
  margin: EdgeInsets.all(0),
  decoration: BoxDecoration(
    color: Colors.transparent,
    borderRadius: BorderRadius.circular(0),
    border: Border.all(color: Colors.transparent),
  ),
  child: Column(
    mainAxisAlignment: MainAxisAlignment.start,
    crossAxisAlignment: CrossAxisAlignment.start,
    children: [],
  ),
)"
        );
    }

    #[test]
    fn test_missing_root_is_empty() {
        let tree = NodeTree::new().with_node(Node::new("other", NodeKind::Text));
        assert_eq!(compile(&tree, &RouteTable::default()), "");
    }

    #[test]
    fn test_text_defaults() {
        let tree = NodeTree::new().with_node(Node::new("t", NodeKind::Text).with_prop("text", "Hola"));
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("t", 0);
        assert_eq!(
            code,
            "Text(
  'Hola',
  style: TextStyle(
    fontSize: 14,
    color: Colors.transparent,
    fontWeight: FontWeight.normal,
    fontFamily: 'Arial',
    decoration: TextDecoration.none,
    letterSpacing: 0.0,
  ),
  textAlign: TextAlign.left,
)"
        );
    }

    #[test]
    fn test_text_styles() {
        let node = Node::new("t", NodeKind::Text)
            .with_prop("text", "It's")
            .with_prop("fontSize", 16)
            .with_prop("color", "#000000")
            .with_prop("fontWeight", "bold")
            .with_prop("fontFamily", "Roboto")
            .with_prop("textDecoration", "line-through")
            .with_prop("letterSpacing", "normal")
            .with_prop("textAlign", "center");
        let tree = NodeTree::new().with_node(node);
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("t", 0);
        assert!(code.contains("'It\\'s',"));
        assert!(code.contains("fontSize: 16,"));
        assert!(code.contains("color: Color(0xFF000000),"));
        assert!(code.contains("fontWeight: FontWeight.bold,"));
        assert!(code.contains("fontFamily: 'Roboto',"));
        assert!(code.contains("decoration: TextDecoration.lineThrough,"));
        assert!(code.contains("letterSpacing: 0.0,"));
        assert!(code.contains("textAlign: TextAlign.center,"));
    }

    #[test]
    fn test_nested_children_are_indented() {
        let tree = NodeTree::new()
            .with_node(root().with_child("t"))
            .with_node(Node::new("t", NodeKind::Checkbox).with_prop("label", "Agree"));
        let code = compile(&tree, &RouteTable::default());
        assert!(code.contains(
            "    children: [
      Row(
        children: [
          Checkbox(value: false, onChanged: (_) {}),
          Text('Agree'),
        ],
      ),
    ],"
        ));
    }

    #[test]
    fn test_dangling_child_is_dropped() {
        let with_dangling = NodeTree::new()
            .with_node(root().with_prop("gap", "8px").with_child("a").with_child("ghost").with_child("b"))
            .with_node(Node::new("a", NodeKind::Text))
            .with_node(Node::new("b", NodeKind::Text));
        let without = NodeTree::new()
            .with_node(root().with_prop("gap", "8px").with_child("a").with_child("b"))
            .with_node(Node::new("a", NodeKind::Text))
            .with_node(Node::new("b", NodeKind::Text));
        let routes = RouteTable::default();
        assert_eq!(compile(&with_dangling, &routes), compile(&without, &routes));
    }

    #[test]
    fn test_gap_spacers_between_children() {
        let tree = NodeTree::new()
            .with_node(
                root()
                    .with_prop("gap", "")
                    .with_prop("rowGap", "12px")
                    .with_prop("flexDirection", "row")
                    .with_child("a")
                    .with_child("b")
                    .with_child("c"),
            )
            .with_node(Node::new("a", NodeKind::Unknown("Video".into())))
            .with_node(Node::new("b", NodeKind::Unknown("Video".into())))
            .with_node(Node::new("c", NodeKind::Unknown("Video".into())));
        let code = compile(&tree, &RouteTable::default());
        assert!(code.contains(
            "    children: [
      SizedBox.shrink(),
      SizedBox(height: 12),
      SizedBox.shrink(),
      SizedBox(height: 12),
      SizedBox.shrink(),
    ],"
        ));
    }

    #[test]
    fn test_zero_gap_has_no_spacer() {
        let tree = NodeTree::new()
            .with_node(root().with_prop("gap", "0px").with_child("a").with_child("b"))
            .with_node(Node::new("a", NodeKind::Table))
            .with_node(Node::new("b", NodeKind::Table));
        assert!(!compile(&tree, &RouteTable::default()).contains("SizedBox(height"));
    }

    #[test]
    fn test_container_styles() {
        let tree = NodeTree::new().with_node(
            root()
                .with_prop("width", "100%")
                .with_prop("height", "375px")
                .with_prop("padding", "4px 8px")
                .with_prop("margin", "1px 2px 3px 4px")
                .with_prop("background", "#ffffff")
                .with_prop("borderRadius", "6px")
                .with_prop("border", "1px dashed #ccc")
                .with_prop("justifyContent", "space-between")
                .with_prop("alignItems", "center"),
        );
        let code = compile(&tree, &RouteTable::default());
        assert!(code.contains("  width: double.infinity,"));
        assert!(code.contains("  height: 375,"));
        assert!(code.contains("  padding: EdgeInsets.symmetric(vertical: 4, horizontal: 8),"));
        assert!(code.contains("  margin: EdgeInsets.fromLTRB(4, 1, 2, 3),"));
        assert!(code.contains("    color: Color(0xFFFFFFFF),"));
        assert!(code.contains("    borderRadius: BorderRadius.circular(6),"));
        assert!(code.contains("    border: Border.all(color: Color(0xFFCCCCCC)),"));
        assert!(code.contains("    mainAxisAlignment: MainAxisAlignment.spaceBetween,"));
        assert!(code.contains("    crossAxisAlignment: CrossAxisAlignment.center,"));
    }

    #[test]
    fn test_button_navigates_to_known_screen() {
        let routes = RouteTable::resolve(["Home", "Pantalla 2"]);
        let tree = NodeTree::new().with_node(
            Node::new("b", NodeKind::Button)
                .with_prop("text", "Next")
                .with_prop("gotoScreen", "Pantalla 2")
                .with_prop("background", "#0d6efd")
                .with_prop("padding", "8px 16px"),
        );
        let code = WidgetCompiler::new(&tree, &routes).compile("b", 0);
        assert!(code.contains("onPressed: () => Navigator.pushNamed(context, '/Pantalla2'),"));
        assert!(code.contains("backgroundColor: Color(0xFF0D6EFD),"));
        assert!(code.contains("padding: EdgeInsets.symmetric(vertical: 8, horizontal: 16),"));
        assert!(code.contains("'Next',"));
    }

    #[test]
    fn test_button_to_unknown_screen_is_noop() {
        let routes = RouteTable::resolve(["Home"]);
        let tree = NodeTree::new().with_node(
            Node::new("b", NodeKind::Button).with_prop("gotoScreen", "Nowhere"),
        );
        let code = WidgetCompiler::new(&tree, &routes).compile("b", 0);
        assert!(code.contains("onPressed: () {},"));
        assert!(code.contains("'Button',"));
    }

    #[test]
    fn test_input_border_color() {
        let tree = NodeTree::new().with_node(
            Node::new("i", NodeKind::Input)
                .with_prop("placeholder", "Email")
                .with_prop("border", "1px solid #ccc")
                .with_prop("borderRadius", "4px"),
        );
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("i", 0);
        assert!(code.contains("hintText: 'Email',"));
        assert!(code.contains("borderSide: BorderSide(color: Color(0xFFCCCCCC)),"));
        assert!(code.contains("borderRadius: BorderRadius.circular(4),"));
    }

    #[test]
    fn test_image_without_src_is_placeholder() {
        let tree = NodeTree::new()
            .with_node(Node::new("a", NodeKind::Image))
            .with_node(Node::new("b", NodeKind::Image).with_prop("src", "  "));
        let routes = RouteTable::default();
        let compiler = WidgetCompiler::new(&tree, &routes);
        assert_eq!(compiler.compile("a", 0), "SizedBox.shrink()");
        assert_eq!(compiler.compile("b", 0), "SizedBox.shrink()");
    }

    #[test]
    fn test_image_with_src() {
        let tree = NodeTree::new().with_node(
            Node::new("img", NodeKind::Image)
                .with_prop("src", "https://example.com/a.png")
                .with_prop("width", "120px")
                .with_prop("borderRadius", 8),
        );
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("img", 0);
        assert!(code.starts_with("Container("));
        assert!(code.contains("  width: 120,"));
        assert!(code.contains("  height: null,"));
        assert!(code.contains("child: ClipRRect("));
        assert!(code.contains("'https://example.com/a.png',"));
        assert_eq!(code.matches("BorderRadius.circular(8)").count(), 2);
    }

    #[test]
    fn test_table_placeholder() {
        let tree = NodeTree::new()
            .with_node(Node::new("t", NodeKind::Table).with_prop("border", "1px solid #ccc"));
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("t", 0);
        assert!(code.contains("border: TableBorder.all(color: Color(0xFFCCCCCC)),"));
        assert!(code.contains("// fluttergen: table rows are not generated"));
    }

    #[test]
    fn test_unknown_kind_is_placeholder() {
        let tree = NodeTree::new().with_node(Node::new("v", NodeKind::Unknown("Video".into())));
        let code = WidgetCompiler::new(&tree, &RouteTable::default()).compile("v", 4);
        assert_eq!(code, "SizedBox.shrink()");
    }

    #[test]
    fn test_cycle_is_broken() {
        let tree = NodeTree::new()
            .with_node(root().with_child("a"))
            .with_node(Node::new("a", NodeKind::Container).with_child(ROOT_ID).with_child("a"));
        let code = compile(&tree, &RouteTable::default());
        assert_eq!(code.matches("Container(").count(), 2);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let tree = NodeTree::new()
            .with_node(root().with_prop("gap", 4).with_child("a").with_child("b"))
            .with_node(Node::new("a", NodeKind::Text).with_prop("text", "x"))
            .with_node(Node::new("b", NodeKind::Button).with_prop("gotoScreen", "Home"));
        let routes = RouteTable::resolve(["Home"]);
        assert_eq!(compile(&tree, &routes), compile(&tree, &routes));
    }
}
