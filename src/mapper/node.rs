//! Path-aware typed accessors over the generic tree.

use serde_json::Map;
use tracing::debug;

use crate::config::TranscodeConfig;
use crate::core::path::FieldPath;
use crate::encode::{
    encode_auth_required, encode_field, encode_sign, Emptiable, LeafError, OptionalShape,
};
use crate::input::{kind_name, Tree};
use crate::model::command::StateSlots;
use crate::model::leaves::{AuthRequired, Optional, RangeCondition, Sign, APP_STATE_LENGTH};

use super::{Diagnostic, DiagnosticKind, TranscodeError};

/// A tree value together with its location in the document.
#[derive(Clone, Debug)]
pub struct Node<'a> {
    value: &'a Tree,
    path: FieldPath,
}

impl<'a> Node<'a> {
    /// The document root.
    pub fn root(value: &'a Tree) -> Self {
        Self { value, path: FieldPath::root() }
    }

    fn at(value: &'a Tree, path: FieldPath) -> Self {
        Self { value, path }
    }

    /// Location in the document.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// True for an explicit null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn shape_error(&self, expected: &'static str) -> TranscodeError {
        TranscodeError::WrongShape {
            path: self.path.clone(),
            expected,
            found: kind_name(self.value),
        }
    }

    fn mapping(&self) -> Result<&'a Map<String, Tree>, TranscodeError> {
        self.value.as_object().ok_or_else(|| self.shape_error("mapping"))
    }

    /// Child that must be present (it may still be null).
    pub fn required(&self, key: &'static str) -> Result<Node<'a>, TranscodeError> {
        self.mapping()?
            .get(key)
            .map(|value| Node::at(value, self.path.key(key)))
            .ok_or_else(|| TranscodeError::MissingField {
                path: self.path.clone(),
                field: key,
            })
    }

    /// Child that may be absent; null counts as absent.
    pub fn optional(&self, key: &str) -> Result<Option<Node<'a>>, TranscodeError> {
        Ok(self
            .mapping()?
            .get(key)
            .filter(|value| !value.is_null())
            .map(|value| Node::at(value, self.path.key(key))))
    }

    /// Elements of a list, in input order.
    pub fn list(&self) -> Result<Vec<Node<'a>>, TranscodeError> {
        let items = self.value.as_array().ok_or_else(|| self.shape_error("list"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, value)| Node::at(value, self.path.index(i)))
            .collect())
    }

    /// Encode this node as a leaf, qualifying any error with its path.
    pub fn leaf<T>(&self, encode: impl FnOnce(&Tree) -> Result<T, LeafError>) -> Result<T, TranscodeError> {
        encode(self.value).map_err(|source| TranscodeError::Leaf {
            path: self.path.clone(),
            source,
        })
    }

    /// Encode a required child as a leaf.
    pub fn required_leaf<T>(
        &self,
        key: &'static str,
        encode: impl FnOnce(&Tree) -> Result<T, LeafError>,
    ) -> Result<T, TranscodeError> {
        self.required(key)?.leaf(encode)
    }

    /// Log keys the schema does not know at this node.
    pub fn note_extra_keys(&self, known: &[&str]) {
        let Some(map) = self.value.as_object() else { return };
        for key in map.keys().filter(|key| !known.contains(&key.as_str())) {
            debug!(path = %self.path, key = %key, "ignoring unknown key");
        }
    }
}

/// Per-run state threaded through the mapper.
#[derive(Debug)]
pub struct MapContext<'c> {
    config: &'c TranscodeConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> MapContext<'c> {
    /// Fresh context for one document.
    pub fn new(config: &'c TranscodeConfig) -> Self {
        Self { config, diagnostics: Vec::new() }
    }

    /// Run configuration.
    pub fn config(&self) -> &TranscodeConfig {
        self.config
    }

    /// Configured optional shape.
    pub fn shape(&self) -> OptionalShape {
        self.config.optional_shape
    }

    /// Diagnostics collected so far.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, path: &FieldPath, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { path: path.clone(), kind };
        diagnostic.log();
        self.diagnostics.push(diagnostic);
    }

    /// Optional child mapped through `inner` when present.
    pub fn optional<'a, T, F>(
        &mut self,
        parent: &Node<'a>,
        key: &'static str,
        inner: F,
    ) -> Result<Optional<T>, TranscodeError>
    where
        T: Emptiable,
        F: FnOnce(&mut Self, &Node<'a>) -> Result<T, TranscodeError>,
    {
        self.optional_where(parent, key, |_| true, inner)
    }

    /// Optional struct-valued child; an empty mapping counts as absent too.
    pub fn optional_block<'a, T, F>(
        &mut self,
        parent: &Node<'a>,
        key: &'static str,
        inner: F,
    ) -> Result<Optional<T>, TranscodeError>
    where
        T: Emptiable,
        F: FnOnce(&mut Self, &Node<'a>) -> Result<T, TranscodeError>,
    {
        self.optional_where(parent, key, |value| !is_empty_mapping(value), inner)
    }

    fn optional_where<'a, T, F>(
        &mut self,
        parent: &Node<'a>,
        key: &'static str,
        keep: fn(&Tree) -> bool,
        inner: F,
    ) -> Result<Optional<T>, TranscodeError>
    where
        T: Emptiable,
        F: FnOnce(&mut Self, &Node<'a>) -> Result<T, TranscodeError>,
    {
        let shape = self.shape();
        let path = parent.path.key(key);
        let input = parent
            .optional(key)?
            .map(|node| node.value)
            .filter(|value| keep(value));
        shape.wrap(input, |value| inner(self, &Node::at(value, path)))
    }

    /// Optional child encoded as a leaf when present.
    pub fn optional_leaf<'a, T: Emptiable>(
        &mut self,
        parent: &Node<'a>,
        key: &'static str,
        encode: impl FnOnce(&Tree) -> Result<T, LeafError>,
    ) -> Result<Optional<T>, TranscodeError> {
        self.optional(parent, key, |_, node| node.leaf(encode))
    }

    /// Optional range condition; `lower` and `upper` are required when present.
    pub fn optional_range<'a, T>(
        &mut self,
        parent: &Node<'a>,
        key: &'static str,
        encode: fn(&Tree) -> Result<T, LeafError>,
    ) -> Result<Optional<RangeCondition<T>>, TranscodeError>
    where
        RangeCondition<T>: Emptiable,
    {
        self.optional(parent, key, |_, node| {
            node.note_extra_keys(&["lower", "upper"]);
            Ok(RangeCondition {
                lower: node.required_leaf("lower", encode)?,
                upper: node.required_leaf("upper", encode)?,
            })
        })
    }

    /// Eight optional field slots, absent slots kept in position.
    pub fn state_slots(&mut self, node: &Node<'_>) -> Result<StateSlots, TranscodeError> {
        let shape = self.shape();
        let items = node.list()?;
        if items.iter().skip(APP_STATE_LENGTH).any(|item| !item.is_null()) {
            return Err(TranscodeError::TooManySlots {
                path: node.path.clone(),
                len: items.len(),
                max: APP_STATE_LENGTH,
            });
        }

        let mut slots: StateSlots = std::array::from_fn(|_| shape.absent());
        for (slot, item) in slots.iter_mut().zip(&items) {
            if !item.is_null() {
                *slot = shape.present(item.leaf(encode_field)?);
            }
        }
        Ok(slots)
    }

    /// Auth requirement at `parent.key`. A missing key is `None`.
    pub fn auth(&mut self, parent: &Node<'_>, key: &'static str) -> Result<AuthRequired, TranscodeError> {
        let node = match parent.mapping()?.get(key) {
            Some(value) => Node::at(value, parent.path.key(key)),
            None => {
                debug!(path = %parent.path, key, "permission not given, using None");
                return Ok(AuthRequired::None);
            }
        };
        let resolved = node.leaf(encode_auth_required)?;
        if let Some(label) = resolved.unrecognised {
            self.report(&node.path, DiagnosticKind::AuthFallback { label });
        }
        Ok(resolved.value)
    }

    /// Balance-change sign of `node`.
    pub fn sign(&mut self, node: &Node<'_>) -> Result<Sign, TranscodeError> {
        let resolved = node.leaf(encode_sign)?;
        if let Some(label) = resolved.unrecognised {
            self.report(&node.path, DiagnosticKind::SignFallback { label });
        }
        Ok(resolved.value)
    }
}

fn is_empty_mapping(value: &Tree) -> bool {
    value.as_object().is_some_and(Map::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldElement;
    use crate::encode::encode_u32;
    use serde_json::json;

    #[test]
    fn test_required_missing_reports_parent_path() {
        let tree = json!({ "body": { "balance": {} } });
        let root = Node::root(&tree);
        let balance = root.required("body").unwrap().required("balance").unwrap();
        let err = balance.required("lower").unwrap_err();
        assert_eq!(err.to_string(), "body.balance: missing required field 'lower'");
    }

    #[test]
    fn test_structural_null_is_wrong_shape() {
        let tree = json!({ "body": null });
        let body = Node::root(&tree).required("body").unwrap();
        let err = body.required("update").unwrap_err();
        assert_eq!(err.to_string(), "body: expected mapping, found null");
    }

    #[test]
    fn test_optional_treats_null_as_absent() {
        let tree = json!({ "a": null, "b": 1 });
        let root = Node::root(&tree);
        assert!(root.optional("a").unwrap().is_none());
        assert!(root.optional("missing").unwrap().is_none());
        assert_eq!(root.optional("b").unwrap().unwrap().path().to_string(), "b");
    }

    #[test]
    fn test_list_paths_are_indexed() {
        let tree = json!({ "xs": [1, 2, 3] });
        let xs = Node::root(&tree).required("xs").unwrap().list().unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[2].path().to_string(), "xs[2]");
    }

    #[test]
    fn test_leaf_error_carries_path() {
        let tree = json!({ "fee": "lots" });
        let err = Node::root(&tree).required_leaf("fee", encode_u32).unwrap_err();
        assert_eq!(err.to_string(), "fee: 'lots' is not an integer");
    }

    #[test]
    fn test_state_slots_padding_and_order() {
        let config = TranscodeConfig::default();
        let mut cx = MapContext::new(&config);

        let tree = json!([null, "5", null]);
        let slots = cx.state_slots(&Node::root(&tree)).unwrap();
        assert_eq!(slots.len(), APP_STATE_LENGTH);
        assert_eq!(slots[1], Optional::Tagged(Some(FieldElement::from(5))));
        assert!(slots.iter().enumerate().all(|(i, s)| i == 1 || !s.is_present()));

        let tree = json!([1, 2, 3, 4, 5, 6, 7, 8, null, null]);
        assert!(cx.state_slots(&Node::root(&tree)).is_ok());

        let tree = json!([1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let err = cx.state_slots(&Node::root(&tree)).unwrap_err();
        assert!(matches!(err, TranscodeError::TooManySlots { len: 9, max: 8, .. }));
    }

    #[test]
    fn test_empty_block_is_absent() {
        let config = TranscodeConfig::default();
        let mut cx = MapContext::new(&config);
        let tree = json!({ "empty": {}, "full": { "n": 3 }, "zero": 0 });
        let root = Node::root(&tree);
        fn read(_: &mut MapContext<'_>, node: &Node<'_>) -> Result<u32, TranscodeError> {
            node.required_leaf("n", encode_u32)
        }

        assert_eq!(cx.optional_block(&root, "empty", read).unwrap(), Optional::Tagged(None));
        assert_eq!(cx.optional_block(&root, "full", read).unwrap(), Optional::Tagged(Some(3)));
        assert!(cx.optional(&root, "empty", read).is_err());
        // only mappings are collapsed, not other falsy values
        assert_eq!(
            cx.optional_block(&root, "zero", |_, node| node.leaf(encode_u32)).unwrap(),
            Optional::Tagged(Some(0))
        );
    }

    #[test]
    fn test_auth_diagnostics() {
        let config = TranscodeConfig::default();
        let mut cx = MapContext::new(&config);
        let tree = json!({ "send": "Signature", "access": "Sig", "receive": "" });
        let root = Node::root(&tree);

        assert_eq!(cx.auth(&root, "send").unwrap(), AuthRequired::Signature);
        assert_eq!(cx.auth(&root, "access").unwrap(), AuthRequired::None);
        assert_eq!(cx.auth(&root, "receive").unwrap(), AuthRequired::None);
        assert_eq!(cx.auth(&root, "setTiming").unwrap(), AuthRequired::None);

        let diagnostics = cx.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].path.to_string(), "access");
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::AuthFallback { label: "Sig".to_string() }
        );
    }
}
