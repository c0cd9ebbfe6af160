//! Mandatory-field (presence) checking.
//!
//! Each configuration entity declares its members through [`Schema::fields`]:
//! the JSON member name, whether it is required, and how to reach nested
//! records. [`check`] walks the declared tree and collects every required
//! member that is absent or empty. It never stops at the first violation.
//!
//! Rules per member kind:
//!
//! - text: required means non-empty.
//! - optional handle: required means present; a present handle is walked.
//! - sequence / mapping: required means non-empty; record-shaped elements
//!   are walked whether or not the member is required.
//! - record without a handle: always walked, never reported itself.
//! - numeric and boolean scalars: never reported, zero is accepted.

use std::collections::BTreeMap;

/// A configuration entity with a statically declared member layout.
pub trait Schema {
    /// Declared members of this entity, in document order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One declared member of a [`Schema`] entity.
pub struct Field<'a> {
    name: &'static str,
    required: bool,
    kind: FieldKind<'a>,
}

/// How a member is reached and what "empty" means for it.
pub enum FieldKind<'a> {
    /// Number or boolean.
    Scalar,
    /// Text value.
    Text(&'a str),
    /// Nested record that is always present.
    Record(&'a dyn Schema),
    /// Nested record behind an optional handle.
    Handle(Option<&'a dyn Schema>),
    /// Ordered sequence; `records` holds the record-shaped elements.
    Sequence {
        len: usize,
        records: Vec<&'a dyn Schema>,
    },
    /// Keyed mapping; `records` holds the record-shaped values.
    Mapping {
        len: usize,
        records: Vec<(&'a str, &'a dyn Schema)>,
    },
}

impl<'a> Field<'a> {
    const fn new(name: &'static str, kind: FieldKind<'a>) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    /// Numeric or boolean member.
    #[must_use]
    pub fn scalar(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar).optional()
    }

    /// Text member.
    #[must_use]
    pub const fn text(name: &'static str, value: &'a str) -> Self {
        Self::new(name, FieldKind::Text(value))
    }

    /// Nested record member without a handle.
    #[must_use]
    pub fn record<T: Schema + 'a>(name: &'static str, value: &'a T) -> Self {
        Self::new(name, FieldKind::Record(value)).optional()
    }

    /// Nested record behind an optional handle.
    #[must_use]
    pub fn handle<T: Schema + 'a>(name: &'static str, value: Option<&'a T>) -> Self {
        Self::new(name, FieldKind::Handle(value.map(|v| v as &dyn Schema)))
    }

    /// Sequence of scalar or text values.
    #[must_use]
    pub fn list<T>(name: &'static str, values: &'a [T]) -> Self {
        Self::new(
            name,
            FieldKind::Sequence {
                len: values.len(),
                records: Vec::new(),
            },
        )
    }

    /// Sequence of records.
    #[must_use]
    pub fn records<T: Schema + 'a>(name: &'static str, values: &'a [T]) -> Self {
        Self::new(
            name,
            FieldKind::Sequence {
                len: values.len(),
                records: values.iter().map(|v| v as &dyn Schema).collect(),
            },
        )
    }

    /// Mapping of scalar or text values.
    #[must_use]
    pub fn map<V>(name: &'static str, values: &'a BTreeMap<String, V>) -> Self {
        Self::new(
            name,
            FieldKind::Mapping {
                len: values.len(),
                records: Vec::new(),
            },
        )
    }

    /// Mapping of records.
    #[must_use]
    pub fn record_map<T: Schema + 'a>(name: &'static str, values: &'a BTreeMap<String, T>) -> Self {
        Self::new(
            name,
            FieldKind::Mapping {
                len: values.len(),
                records: values
                    .iter()
                    .map(|(k, v)| (k.as_str(), v as &dyn Schema))
                    .collect(),
            },
        )
    }

    /// Mark this member as one that may be omitted.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Outcome of a presence walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presence {
    /// One message per missing or empty required member.
    pub messages: Vec<String>,
}

impl Presence {
    /// Whether every required member was present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    fn missing(&mut self, parent: &str, name: &str) {
        self.messages.push(format!("{parent}.{name} should not be empty."));
    }
}

/// Walk `node` and report every required member that is absent or empty.
///
/// `parent` labels the node in messages, e.g. `spec` yields
/// `spec.process.cwd should not be empty.`.
#[must_use]
pub fn check(node: &dyn Schema, parent: &str) -> Presence {
    let mut presence = Presence::default();
    walk(node, parent, &mut presence);
    presence
}

fn walk(node: &dyn Schema, parent: &str, presence: &mut Presence) {
    for field in node.fields() {
        let path = format!("{parent}.{}", field.name);
        match field.kind {
            FieldKind::Scalar => {}
            FieldKind::Text(value) => {
                if field.required && value.is_empty() {
                    presence.missing(parent, field.name);
                }
            }
            FieldKind::Record(record) => walk(record, &path, presence),
            FieldKind::Handle(None) => {
                if field.required {
                    presence.missing(parent, field.name);
                }
            }
            FieldKind::Handle(Some(record)) => walk(record, &path, presence),
            FieldKind::Sequence { len, records } => {
                if field.required && len == 0 {
                    presence.missing(parent, field.name);
                }
                for (index, record) in records.into_iter().enumerate() {
                    walk(record, &format!("{path}[{index}]"), presence);
                }
            }
            FieldKind::Mapping { len, records } => {
                if field.required && len == 0 {
                    presence.missing(parent, field.name);
                }
                for (key, record) in records {
                    walk(record, &format!("{path}[{key}]"), presence);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Leaf {
        label: String,
        note: String,
        count: u32,
    }

    impl Schema for Leaf {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::text("label", &self.label),
                Field::text("note", &self.note).optional(),
                Field::scalar("count"),
            ]
        }
    }

    #[derive(Default)]
    struct Tree {
        name: String,
        leaf: Leaf,
        extra: Option<Leaf>,
        maybe: Option<Leaf>,
        tags: Vec<String>,
        leaves: Vec<Leaf>,
        by_key: BTreeMap<String, Leaf>,
        labels: BTreeMap<String, String>,
    }

    impl Schema for Tree {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::text("name", &self.name),
                Field::record("leaf", &self.leaf),
                Field::handle("extra", self.extra.as_ref()),
                Field::handle("maybe", self.maybe.as_ref()).optional(),
                Field::list("tags", &self.tags),
                Field::records("leaves", &self.leaves).optional(),
                Field::record_map("byKey", &self.by_key).optional(),
                Field::map("labels", &self.labels).optional(),
            ]
        }
    }

    fn leaf(label: &str) -> Leaf {
        Leaf {
            label: label.to_string(),
            ..Leaf::default()
        }
    }

    fn complete_tree() -> Tree {
        Tree {
            name: "t".to_string(),
            leaf: leaf("a"),
            extra: Some(leaf("b")),
            tags: vec!["x".to_string()],
            ..Tree::default()
        }
    }

    #[test]
    fn test_complete_tree_is_valid() {
        let presence = check(&complete_tree(), "tree");
        assert!(presence.is_valid(), "{:?}", presence.messages);
    }

    #[test]
    fn test_empty_tree_reports_every_required_member() {
        let presence = check(&Tree::default(), "tree");
        assert!(!presence.is_valid());
        assert_eq!(
            presence.messages,
            vec![
                "tree.name should not be empty.",
                "tree.leaf.label should not be empty.",
                "tree.extra should not be empty.",
                "tree.tags should not be empty.",
            ]
        );
    }

    #[test]
    fn test_optional_members_are_never_reported() {
        let presence = check(&complete_tree(), "tree");
        assert!(!presence
            .messages
            .iter()
            .any(|m| m.contains("maybe") || m.contains("note") || m.contains("labels")));
    }

    #[test]
    fn test_present_handle_is_walked() {
        let tree = Tree {
            extra: Some(Leaf::default()),
            ..complete_tree()
        };
        let presence = check(&tree, "tree");
        assert_eq!(presence.messages, vec!["tree.extra.label should not be empty."]);
    }

    #[test]
    fn test_optional_sequence_elements_are_walked() {
        let tree = Tree {
            leaves: vec![leaf("ok"), Leaf::default()],
            ..complete_tree()
        };
        let presence = check(&tree, "tree");
        assert_eq!(
            presence.messages,
            vec!["tree.leaves[1].label should not be empty."]
        );
    }

    #[test]
    fn test_mapping_values_are_walked() {
        let mut tree = complete_tree();
        tree.by_key.insert("first".to_string(), Leaf::default());
        let presence = check(&tree, "tree");
        assert_eq!(
            presence.messages,
            vec!["tree.byKey[first].label should not be empty."]
        );
    }

    #[test]
    fn test_zero_scalars_are_accepted() {
        let tree = complete_tree();
        assert_eq!(tree.leaf.count, 0);
        assert!(check(&tree, "tree").is_valid());
    }

    #[test]
    fn test_field_constructors() {
        let field = Field::text("cwd", "/");
        assert_eq!(field.name, "cwd");
        assert!(field.required);
        assert!(matches!(field.kind, FieldKind::Text("/")));
        assert!(!Field::scalar("uid").required);
        assert!(!Field::text("hostname", "").optional().required);
    }
}
