use directive_macros as dm;
use dm::{Constant, Context, Options, PRODUCTION};
use proptest::prelude::*;
use serde_json::{json, Value};

fn options(production: bool, value: Value) -> Options {
    let opts = Options::default().with_constant("C", Constant::Literal(value));
    if production {
        opts.with_flag(PRODUCTION)
    } else {
        opts
    }
}

/// Right-hand side of `const C = ...;`.
fn emitted_literal(out: &str) -> &str {
    out.strip_prefix("const C = ")
        .and_then(|rest| rest.strip_suffix(';'))
        .expect("binding shape")
}

proptest! {
    #[test]
    fn same_bundle_same_output(production: bool, expr in "[ -~]{0,40}", key in "@?[a-z]{1,8}", value in "[ -~]{0,20}") {
        let a = Context::new(&options(production, json!(1)));
        let b = Context::new(&options(production, json!(1)));
        let calls: Vec<(&str, Vec<Value>)> = vec![
            ("SANITY", vec![json!(expr.clone())]),
            ("SANITY", vec![json!(expr.clone()), json!("recover()")]),
            ("SANITY_FAIL", vec![]),
            ("DEFINE_NO_ACCESS", vec![json!("obj"), json!(key.clone())]),
            ("DEFINE_CONSTANTS", vec![json!("obj"), json!(key.clone()), json!(value.clone())]),
            ("DEFINE_ATTRIBUTE", vec![json!("obj"), json!("check"), json!(key.clone()), json!(value.clone())]),
            ("CONSTANTS", vec![json!("C")]),
        ];
        for (name, args) in calls {
            prop_assert_eq!(a.call(name, &args).unwrap(), b.call(name, &args).unwrap());
        }
    }

    #[test]
    fn string_constants_round_trip(s in any::<String>()) {
        let out = Context::new(&options(false, json!(s.clone()))).expand("CONSTANTS(C)").unwrap();
        let back: Value = serde_json::from_str(emitted_literal(&out)).unwrap();
        prop_assert_eq!(back, json!(s));
    }

    #[test]
    fn integer_and_bool_constants_round_trip(n: i64, b: bool) {
        for value in [json!(n), json!(b)] {
            let out = Context::new(&options(true, value.clone())).expand("CONSTANTS(C)").unwrap();
            let back: Value = serde_json::from_str(emitted_literal(&out)).unwrap();
            prop_assert_eq!(back, value);
        }
    }

    #[test]
    fn sanity_message_keeps_expression_parseable(expr in "[ -~]{0,40}") {
        let out = Context::new(&Options::default()).call("SANITY", &[json!(expr.clone())]).unwrap();
        let start = format!("if(!( {expr} )) {{ throw new Error(").len();
        let end = out.rfind(") }").unwrap();
        let message: String = serde_json::from_str(&out[start..end]).unwrap();
        prop_assert_eq!(message, format!("Sanity check failed: << {expr} >>"));
    }
}

#[test]
fn quoted_and_escaped_strings_round_trip() {
    for s in [r#"say "hi""#, r"C:\path\to", "tab\tnew\nline", "'single'"] {
        let out = Context::new(&options(false, json!(s))).expand("CONSTANTS(C)").unwrap();
        let back: Value = serde_json::from_str(emitted_literal(&out)).unwrap();
        assert_eq!(back, json!(s));
    }
}

#[test]
fn float_constants_round_trip() {
    for f in [0.5, -2.25, 1024.0] {
        let out = Context::new(&options(false, json!(f))).expand("CONSTANTS(C)").unwrap();
        let back: Value = serde_json::from_str(emitted_literal(&out)).unwrap();
        assert_eq!(back, json!(f));
    }
}
