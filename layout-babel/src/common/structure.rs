//! Re-nesting a canonical tree for one dialect
//!
//!     Parsers keep whatever structure the source had. Converters cannot: Divi will not
//!     render a module outside section > row > column, a WPBakery row holds nothing but
//!     columns, and Elementor sections are rows rather than wrappers of rows. [shape] takes a
//!     forest and a dialect's [Nesting] rules and returns a [Shaped] tree that satisfies
//!     them, adding synthetic wrappers where they are missing and dissolving containers the
//!     dialect cannot place.
//!
//! Rules
//!
//!     Applied for every dialect:
//!         - row children are columns; other runs get a synthetic full-width column
//!         - columns outside a row are grouped into a synthetic row
//!         - rows inside a column are marked inner, and so are their columns
//!
//!     Chosen per dialect via [Nesting]:
//!         - what the top level may hold
//!         - whether containers hold anything or only rows
//!         - whether containers may appear below the top level
//!         - whether containers and columns may hold text directly
//!
//!     Text moved out of a structural node becomes a synthetic text child at the front.

use layout_model::{AttrKey, Component, ComponentType};
use std::borrow::Cow;

/// What the top level of a document may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevel {
    Any,
    /// Containers and rows; anything else is wrapped in a row
    SectionsOrRows,
    /// Containers only; anything else is wrapped in a container
    Sections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerChildren {
    Any,
    RowsOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct Nesting {
    pub top: TopLevel,
    pub container_children: ContainerChildren,
    /// Containers may appear inside other nodes
    pub nested_containers: bool,
    /// Containers that hold rows are dissolved into their children
    pub dissolve_row_containers: bool,
    /// Containers and columns may carry text content themselves
    pub structural_text: bool,
}

/// A node ready for emission
#[derive(Debug, Clone)]
pub struct Shaped<'a> {
    pub node: Cow<'a, Component>,
    /// Added by shaping; has no source node
    pub synthetic: bool,
    /// Nested inside a column
    pub inner: bool,
    /// Content was moved into a synthetic text child
    content_moved: bool,
    pub children: Vec<Shaped<'a>>,
}

impl<'a> Shaped<'a> {
    fn real(node: &'a Component, inner: bool, content_moved: bool, children: Vec<Shaped<'a>>) -> Self {
        Self {
            node: Cow::Borrowed(node),
            synthetic: false,
            inner,
            content_moved,
            children,
        }
    }

    fn wrapper(kind: ComponentType, inner: bool, children: Vec<Shaped<'a>>) -> Self {
        let mut node = Component::new(kind);
        if kind == ComponentType::Column {
            node.attributes.insert(AttrKey::Width, "100%");
        }
        Self {
            node: Cow::Owned(node),
            synthetic: true,
            inner,
            content_moved: false,
            children,
        }
    }

    fn text(content: &str, inner: bool) -> Self {
        Self {
            node: Cow::Owned(Component::new(ComponentType::Text).with_content(content)),
            synthetic: true,
            inner,
            content_moved: false,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ComponentType {
        self.node.kind
    }

    /// Content to emit on this node itself.
    pub fn content(&self) -> &str {
        if self.content_moved {
            ""
        } else {
            &self.node.content
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Item<'a> {
    Node(&'a Component),
    Text(&'a str),
}

/// Re-nest `nodes` for a dialect.
pub fn shape<'a>(nodes: &'a [Component], nesting: &Nesting) -> Vec<Shaped<'a>> {
    let shaper = Shaper { nesting: *nesting };
    let items: Vec<Item<'a>> = nodes.iter().map(Item::Node).collect();
    match nesting.top {
        TopLevel::Any => shaper.free(items, false, true),
        TopLevel::SectionsOrRows | TopLevel::Sections => shaper.sections(items),
    }
}

struct Shaper {
    nesting: Nesting,
}

impl Shaper {
    fn sections<'a>(&self, items: Vec<Item<'a>>) -> Vec<Shaped<'a>> {
        let mut out = Vec::new();
        let mut loose = Vec::new();
        for item in self.dissolve(items) {
            match item {
                Item::Node(c) if c.kind == ComponentType::Container => {
                    self.flush_sections(&mut loose, &mut out);
                    out.push(self.container(c));
                }
                Item::Node(c)
                    if c.kind == ComponentType::Row && self.nesting.top == TopLevel::SectionsOrRows =>
                {
                    self.flush_sections(&mut loose, &mut out);
                    out.push(self.row(c, false));
                }
                other => loose.push(other),
            }
        }
        self.flush_sections(&mut loose, &mut out);
        out
    }

    fn flush_sections<'a>(&self, loose: &mut Vec<Item<'a>>, out: &mut Vec<Shaped<'a>>) {
        if loose.is_empty() {
            return;
        }
        let run = std::mem::take(loose);
        match self.nesting.top {
            TopLevel::Sections => out.push(Shaped::wrapper(
                ComponentType::Container,
                false,
                self.rows_only(run, false),
            )),
            _ => out.push(Shaped::wrapper(
                ComponentType::Row,
                false,
                self.columns(run, false),
            )),
        }
    }

    /// Replace containers that must not survive with their contents.
    fn dissolve<'a>(&self, items: Vec<Item<'a>>) -> Vec<Item<'a>> {
        let mut out = Vec::new();
        for item in items {
            match item {
                Item::Node(c) if c.kind == ComponentType::Container && self.must_dissolve(c) => {
                    out.extend(self.dissolve(contents(c)));
                }
                other => out.push(other),
            }
        }
        out
    }

    fn must_dissolve(&self, container: &Component) -> bool {
        self.nesting.dissolve_row_containers
            && container
                .children
                .iter()
                .any(|child| child.kind == ComponentType::Row)
    }

    fn container<'a>(&self, c: &'a Component) -> Shaped<'a> {
        let (items, moved) = self.structural_items(c);
        let children = match self.nesting.container_children {
            ContainerChildren::RowsOnly => self.rows_only(items, false),
            ContainerChildren::Any => self.free(items, false, false),
        };
        Shaped::real(c, false, moved, children)
    }

    fn rows_only<'a>(&self, items: Vec<Item<'a>>, inner: bool) -> Vec<Shaped<'a>> {
        let mut out = Vec::new();
        let mut loose = Vec::new();
        for item in flatten_containers(items) {
            match item {
                Item::Node(c) if c.kind == ComponentType::Row => {
                    if !loose.is_empty() {
                        let run = std::mem::take(&mut loose);
                        out.push(Shaped::wrapper(ComponentType::Row, inner, self.columns(run, inner)));
                    }
                    out.push(self.row(c, inner));
                }
                other => loose.push(other),
            }
        }
        if !loose.is_empty() {
            out.push(Shaped::wrapper(ComponentType::Row, inner, self.columns(loose, inner)));
        }
        out
    }

    fn row<'a>(&self, c: &'a Component, inner: bool) -> Shaped<'a> {
        let mut items = Vec::new();
        if !c.content.trim().is_empty() {
            items.push(Item::Text(&c.content));
        }
        items.extend(c.children.iter().map(Item::Node));
        Shaped::real(c, inner, true, self.columns(items, inner))
    }

    fn columns<'a>(&self, items: Vec<Item<'a>>, inner: bool) -> Vec<Shaped<'a>> {
        let mut out = Vec::new();
        let mut loose = Vec::new();
        for item in items {
            match item {
                Item::Node(c) if c.kind == ComponentType::Column => {
                    if !loose.is_empty() {
                        let run = std::mem::take(&mut loose);
                        out.push(Shaped::wrapper(ComponentType::Column, inner, self.free(run, true, false)));
                    }
                    out.push(self.column(c, inner));
                }
                other => loose.push(other),
            }
        }
        if !loose.is_empty() {
            out.push(Shaped::wrapper(ComponentType::Column, inner, self.free(loose, true, false)));
        }
        out
    }

    fn column<'a>(&self, c: &'a Component, inner: bool) -> Shaped<'a> {
        let (items, moved) = self.structural_items(c);
        Shaped::real(c, inner, moved, self.free(items, true, false))
    }

    /// Children of a container or column, with its text moved in front when the dialect
    /// cannot keep it on the node.
    fn structural_items<'a>(&self, c: &'a Component) -> (Vec<Item<'a>>, bool) {
        let mut items = Vec::new();
        let moved = !self.nesting.structural_text && !c.content.trim().is_empty();
        if moved {
            items.push(Item::Text(&c.content));
        }
        items.extend(c.children.iter().map(Item::Node));
        (items, moved)
    }

    /// Mixed content: widgets stay, columns get a row, containers are kept or dissolved.
    fn free<'a>(&self, items: Vec<Item<'a>>, inner: bool, top: bool) -> Vec<Shaped<'a>> {
        let mut out = Vec::new();
        let mut columns: Vec<&'a Component> = Vec::new();
        for item in items {
            let node = match item {
                Item::Node(c) if c.kind == ComponentType::Column => {
                    columns.push(c);
                    continue;
                }
                other => other,
            };
            if !columns.is_empty() {
                let run = std::mem::take(&mut columns);
                out.push(self.column_run(run, inner));
            }
            match node {
                Item::Text(text) => out.push(Shaped::text(text.trim(), inner)),
                Item::Node(c) => match c.kind {
                    ComponentType::Container => {
                        if (top || self.nesting.nested_containers) && !self.must_dissolve(c) {
                            out.push(self.container(c));
                        } else {
                            out.extend(self.free(contents(c), inner, top));
                        }
                    }
                    ComponentType::Row => out.push(self.row(c, inner)),
                    _ => out.push(self.widget(c, inner)),
                },
            }
        }
        if !columns.is_empty() {
            out.push(self.column_run(columns, inner));
        }
        out
    }

    fn column_run<'a>(&self, run: Vec<&'a Component>, inner: bool) -> Shaped<'a> {
        let columns = run.into_iter().map(|c| self.column(c, inner)).collect();
        Shaped::wrapper(ComponentType::Row, inner, columns)
    }

    fn widget<'a>(&self, c: &'a Component, inner: bool) -> Shaped<'a> {
        let items = c.children.iter().map(Item::Node).collect();
        Shaped::real(c, inner, false, self.free(items, true, false))
    }
}

fn contents(c: &Component) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    if !c.content.trim().is_empty() {
        items.push(Item::Text(&c.content));
    }
    items.extend(c.children.iter().map(Item::Node));
    items
}

fn flatten_containers(items: Vec<Item<'_>>) -> Vec<Item<'_>> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Item::Node(c) if c.kind == ComponentType::Container => {
                out.extend(flatten_containers(contents(c)))
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: Nesting = Nesting {
        top: TopLevel::Sections,
        container_children: ContainerChildren::RowsOnly,
        nested_containers: false,
        dissolve_row_containers: false,
        structural_text: false,
    };

    const LOOSE: Nesting = Nesting {
        top: TopLevel::Any,
        container_children: ContainerChildren::Any,
        nested_containers: true,
        dissolve_row_containers: false,
        structural_text: true,
    };

    const ROW_SECTIONS: Nesting = Nesting {
        top: TopLevel::SectionsOrRows,
        container_children: ContainerChildren::Any,
        nested_containers: true,
        dissolve_row_containers: true,
        structural_text: false,
    };

    fn kinds(shaped: &Shaped<'_>) -> String {
        let mut out = shaped.kind().as_str().to_string();
        if shaped.synthetic {
            out.push('*');
        }
        if !shaped.children.is_empty() {
            let children: Vec<String> = shaped.children.iter().map(kinds).collect();
            out.push_str(&format!("({})", children.join(" ")));
        }
        out
    }

    fn render(shaped: &[Shaped<'_>]) -> String {
        shaped.iter().map(kinds).collect::<Vec<_>>().join(" ")
    }

    fn column(children: Vec<Component>) -> Component {
        Component::new(ComponentType::Column).with_children(children)
    }

    #[test]
    fn test_loose_widget_wrapped_fully_for_strict_dialects() {
        let tree = vec![Component::new(ComponentType::Heading)];
        assert_eq!(
            render(&shape(&tree, &STRICT)),
            "container*(row*(column*(heading)))"
        );
        assert_eq!(render(&shape(&tree, &LOOSE)), "heading");
        assert_eq!(render(&shape(&tree, &ROW_SECTIONS)), "row*(column*(heading))");
    }

    #[test]
    fn test_consecutive_loose_nodes_share_one_wrapper() {
        let tree = vec![
            Component::new(ComponentType::Heading),
            Component::new(ComponentType::Text),
            Component::new(ComponentType::Row).with_child(column(vec![])),
        ];
        assert_eq!(
            render(&shape(&tree, &ROW_SECTIONS)),
            "row*(column*(heading text)) row(column)"
        );
    }

    #[test]
    fn test_row_children_become_columns() {
        let tree = vec![Component::new(ComponentType::Row)
            .with_child(column(vec![Component::new(ComponentType::Text)]))
            .with_child(Component::new(ComponentType::Image))];
        assert_eq!(
            render(&shape(&tree, &LOOSE)),
            "row(column(text) column*(image))"
        );
    }

    #[test]
    fn test_nested_rows_are_inner() {
        let nested = Component::new(ComponentType::Row).with_child(column(vec![]));
        let tree = vec![Component::new(ComponentType::Row).with_child(column(vec![nested]))];
        let shaped = shape(&tree, &LOOSE);
        let inner_row = &shaped[0].children[0].children[0];
        assert_eq!(inner_row.kind(), ComponentType::Row);
        assert!(inner_row.inner);
        assert!(inner_row.children[0].inner);
        assert!(!shaped[0].inner);
    }

    #[test]
    fn test_columns_at_top_get_a_row() {
        let tree = vec![column(vec![]), column(vec![])];
        assert_eq!(render(&shape(&tree, &LOOSE)), "row*(column column)");
        assert_eq!(
            render(&shape(&tree, &STRICT)),
            "container*(row*(column column))"
        );
    }

    #[test]
    fn test_column_text_moves_to_child_when_not_allowed() {
        let tree = vec![Component::new(ComponentType::Row)
            .with_child(Component::new(ComponentType::Column).with_content("Hello"))];
        let strict = shape(&tree, &STRICT);
        let col = &strict[0].children[0].children[0];
        assert_eq!(col.content(), "");
        assert_eq!(col.children[0].kind(), ComponentType::Text);
        assert_eq!(col.children[0].content(), "Hello");

        let loose = shape(&tree, &LOOSE);
        assert_eq!(loose[0].children[0].content(), "Hello");
        assert!(loose[0].children[0].children.is_empty());
    }

    #[test]
    fn test_container_holding_rows_dissolves_when_asked() {
        let row = Component::new(ComponentType::Row).with_child(column(vec![]));
        let tree = vec![Component::new(ComponentType::Container).with_child(row)];
        assert_eq!(render(&shape(&tree, &ROW_SECTIONS)), "row(column)");
        assert_eq!(render(&shape(&tree, &STRICT)), "container(row(column))");
    }

    #[test]
    fn test_nested_container_flattened_for_strict() {
        let inner = Component::new(ComponentType::Container)
            .with_child(Component::new(ComponentType::Text));
        let tree = vec![Component::new(ComponentType::Container).with_child(inner)];
        assert_eq!(
            render(&shape(&tree, &STRICT)),
            "container(row*(column*(text)))"
        );
        assert_eq!(render(&shape(&tree, &LOOSE)), "container(container(text))");
    }

    #[test]
    fn test_synthetic_column_is_full_width() {
        let tree = vec![Component::new(ComponentType::Text)];
        let shaped = shape(&tree, &STRICT);
        let col = &shaped[0].children[0].children[0];
        assert_eq!(col.node.attributes.get_str(&AttrKey::Width), Some("100%"));
    }
}
