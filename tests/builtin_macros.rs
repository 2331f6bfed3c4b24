use directive_macros as dm;
use dm::macros::{DefineConstants, NoAccess, Sanity};
use dm::{Key, Macro, Options, Registry};
use serde_json::{json, Value};
use std::ops::RangeInclusive;

#[test]
fn test_typed_pairs_match_directive_form() {
    let pairs = vec![
        (Key::Literal("k".into()), "1".to_string()),
        (Key::Expression("sym".into()), "2".to_string()),
    ];
    let typed = DefineConstants::new(false).render("obj", &pairs);
    let dynamic = DefineConstants::new(false)
        .invoke(&[json!("obj"), json!("k"), json!("1"), json!("@sym"), json!("2")])
        .unwrap();
    assert_eq!(typed, dynamic);
}

#[test]
fn test_no_access_leaves_other_names_alone() {
    let out = NoAccess::new(false).render("obj", &["secret"]);
    assert!(out.contains("\"secret\""));
    assert!(!out.contains("\"other\""));
}

#[test]
fn test_sanity_null_fallback_is_omitted() {
    let out = Sanity::new(true).invoke(&[json!("ok"), Value::Null]).unwrap();
    assert_eq!(out, "");
}

struct Banner;
impl Macro for Banner {
    fn name(&self) -> &'static str { "BANNER" }
    fn arity(&self) -> RangeInclusive<usize> { 0..=0 }
    fn call(&self, _args: &[Value]) -> dm::errors::Result<String> {
        Ok("/* generated */".into())
    }
}

#[test]
fn test_custom_registry_context() {
    let opts = Options::default().with_flag("PRODUCTION");
    let mut registry = Registry::with_builtins(opts.is_production(), opts.constants.clone());
    registry.register(Banner);
    let ctx = dm::Context::with_registry(&opts, &registry);
    assert_eq!(ctx.expand("BANNER()").unwrap(), "/* generated */");
    assert_eq!(ctx.expand("SANITY_FAIL()").unwrap(), "");
}

#[test]
fn test_expand_helper() {
    let out = dm::expand(&Options::default(), r#"SANITY("ready")"#).unwrap();
    assert!(out.contains("<< ready >>"));
}
