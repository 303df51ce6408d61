use serde_json::{Map, Value};

/// The statistics document: repository identifier → statistic name → value.
pub type StatsDocument = Map<String, Value>;

/// Store `value` at `path` below `root`.
///
/// Missing intermediate mappings are created. Only the leaf is overwritten: sibling keys at
/// every level are left untouched. An intermediate key holding something other than a
/// mapping is replaced by a mapping. An empty `path` leaves `root` unchanged.
pub fn set_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [leaf] => {
            let _ = root.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = root.entry((*head).to_string()).or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }

            if let Value::Object(map) = child {
                set_path(map, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> StatsDocument {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_creates_intermediate_mappings() {
        let mut root = StatsDocument::new();
        set_path(&mut root, &["a/b", "cloc", "src"], json!({ "SUM": { "code": 3 } }));

        assert_eq!(Value::Object(root), json!({ "a/b": { "cloc": { "src": { "SUM": { "code": 3 } } } } }));
    }

    #[test]
    fn test_keeps_siblings() {
        let mut root = doc(json!({ "a/b": { "stargazers_count": 10, "cloc": { "src": 1 } } }));
        set_path(&mut root, &["a/b", "cloc", "tests"], json!(2));

        assert_eq!(
            Value::Object(root),
            json!({ "a/b": { "stargazers_count": 10, "cloc": { "src": 1, "tests": 2 } } })
        );
    }

    #[test]
    fn test_overwrites_only_the_leaf() {
        let mut root = doc(json!({ "a/b": { "contributors": 1, "language": "Rust" } }));
        set_path(&mut root, &["a/b", "contributors"], json!(5));

        assert_eq!(Value::Object(root), json!({ "a/b": { "contributors": 5, "language": "Rust" } }));
    }

    #[test]
    fn test_leaf_may_replace_a_mapping() {
        let mut root = doc(json!({ "a/b": { "cloc": { "src": 1 } } }));
        set_path(&mut root, &["a/b", "cloc"], json!(null));

        assert_eq!(Value::Object(root), json!({ "a/b": { "cloc": null } }));
    }

    #[test]
    fn test_non_mapping_intermediate_is_replaced() {
        let mut root = doc(json!({ "a/b": { "cloc": "pending" } }));
        set_path(&mut root, &["a/b", "cloc", "src"], json!(1));

        assert_eq!(Value::Object(root), json!({ "a/b": { "cloc": { "src": 1 } } }));
    }

    #[test]
    fn test_dots_are_literal_key_characters() {
        let mut root = StatsDocument::new();
        set_path(&mut root, &["vercel/next.js", "cloc", "v1.0"], json!(1));

        assert_eq!(Value::Object(root), json!({ "vercel/next.js": { "cloc": { "v1.0": 1 } } }));
    }

    #[test]
    fn test_empty_path_is_noop() {
        let mut root = doc(json!({ "a/b": { "tags": [] } }));
        set_path(&mut root, &[], json!(1));

        assert_eq!(Value::Object(root), json!({ "a/b": { "tags": [] } }));
    }
}
