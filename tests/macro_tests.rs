use tagmap::{describe, from_str, tagmap, value, FieldKind, Map, MapOptions, Number, Value};

#[test]
fn test_value_macro_null() {
    let value = value!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_value_macro_booleans() {
    assert_eq!(value!(true), Value::Bool(true));
    assert_eq!(value!(false), Value::Bool(false));
}

#[test]
fn test_value_macro_numbers() {
    assert_eq!(value!(42), Value::Number(Number::Int(42)));
    assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(value!(-123), Value::Number(Number::Int(-123)));
    assert_eq!(value!(u64::MAX), Value::Number(Number::Uint(u64::MAX)));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(value!(""), Value::String(String::new()));
}

#[test]
fn test_value_macro_arrays() {
    assert_eq!(value!([]), Value::Array(vec![]));
    assert_eq!(
        value!([1, "two", null, [true]]),
        Value::Array(vec![
            Value::Number(Number::Int(1)),
            Value::String("two".to_string()),
            Value::Null,
            Value::Array(vec![Value::Bool(true)]),
        ])
    );
}

#[test]
fn test_value_macro_object_keeps_order() {
    let value = value!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_value_macro_expressions() {
    let name = String::from("dynamic");
    let value = value!({ "name": name, "missing": (None::<i32>) });

    let mut expected = Map::new();
    expected.insert("name".to_string(), Value::from("dynamic"));
    expected.insert("missing".to_string(), Value::Null);
    assert_eq!(value, Value::Object(expected));
}

tagmap! {
    /// Attributes and doc comments pass through.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Visible {
        /// Documented field.
        pub public: String => "public",
        pub(crate) scoped: i64 => ("scoped", v2 = "alt.scoped",),
        private: bool => (v2 = "flag"),
    }
}

tagmap! {
    #[derive(Default)]
    struct Empty {}
}

tagmap! {
    #[derive(Default)]
    struct AllSkipped {
        a: Vec<String> => skip,
        b: std::collections::HashMap<String, String> => skip
    }
}

#[test]
fn test_tagmap_struct_is_usable() {
    let v = Visible {
        public: "p".to_string(),
        scoped: 1,
        private: true,
    };
    assert_eq!(v.clone(), v);
    assert!(v.private);
}

#[test]
fn test_tagmap_trailing_comma_in_tags() {
    let fields = describe::<Visible>();
    assert_eq!(fields[1].spec.annotation(""), "scoped");
    assert_eq!(fields[1].spec.annotation("v2"), "alt.scoped");
    assert_eq!(fields[2].spec.annotation(""), "");
}

#[test]
fn test_tagmap_empty_and_all_skipped() {
    assert!(describe::<Empty>().is_empty());
    assert!(describe::<AllSkipped>().is_empty());

    let (_, report) = from_str::<AllSkipped, _>(r#"{"a": ["x"]}"#, &MapOptions::new()).unwrap();
    assert!(report.is_clean());
}

tagmap! {
    #[derive(Debug, Default, PartialEq)]
    struct Leaf {
        n: u8 => "n",
    }
}

tagmap! {
    #[derive(Debug, Default, PartialEq)]
    struct Branch {
        leaf: Leaf => "leaf",
        maybe: Option<Leaf> => "maybe",
    }
}

tagmap! {
    #[derive(Debug, Default, PartialEq)]
    struct Tree {
        branch: Branch => "branch",
        branches: Option<Branch> => "other",
    }
}

#[test]
fn test_tagmap_nesting_kinds() {
    let kinds: Vec<_> = describe::<Tree>().into_iter().map(|f| f.kind).collect();
    assert_eq!(kinds, [FieldKind::Composite, FieldKind::OptionalComposite]);

    let json = r#"{"branch": {"leaf": {"n": 1}, "maybe": {"n": 2}}, "other": {"maybe": {"n": 3}}}"#;
    let (tree, report) = from_str::<Tree, _>(json, &MapOptions::new()).unwrap();
    assert!(report.is_clean());
    assert_eq!(tree.branch.leaf.n, 1);
    assert_eq!(tree.branch.maybe, Some(Leaf { n: 2 }));
    assert_eq!(
        tree.branches,
        Some(Branch {
            leaf: Leaf::default(),
            maybe: Some(Leaf { n: 3 }),
        })
    );
}
