//! End-to-end tests: host types wrapped by an `Engine` and rendered through
//! `${...}` templates.

use std::sync::Arc;
use std::thread;
use tmpl::tracing_config::LogFormat;
use tmpl::{
    AppearanceDecision, DataModel, Engine, HostObject, HostType, HostTypeBuilder,
    MemberClassification, ResolutionPolicy, ReturnKind, Value, WrapperConfig, diagnostic_codes,
};

struct Point {
    x: i64,
    y: i64,
}

struct Account {
    name: String,
    active: bool,
}

fn point_type() -> Arc<HostType> {
    HostTypeBuilder::<Point>::new("Point")
        .component("x", ReturnKind::Value, |p| Value::from(p.x))
        .component("y", ReturnKind::Value, |p| Value::from(p.y))
        .method("getX", ReturnKind::Value, |p| Ok(Value::from(p.x + 1)))
        .build()
}

/// Composite whose component names follow the property-reader convention.
fn account_record_type() -> Arc<HostType> {
    HostTypeBuilder::<Account>::new("AccountRecord")
        .component("isActive", ReturnKind::Boolean, |a| Value::from(a.active))
        .component("getName", ReturnKind::Value, |a| Value::from(a.name.as_str()))
        .build()
}

fn data() -> DataModel {
    let point = HostObject::new(point_type(), Point { x: 3, y: 4 }).expect("payload matches");
    let record = HostObject::new(account_record_type(), Account {
        name: "N".to_string(),
        active: true,
    })
    .expect("payload matches");
    DataModel::new().with("point", point).with("r", record)
}

fn engine(default_policy: ResolutionPolicy) -> Engine {
    Engine::new(WrapperConfig::new(default_policy))
}

#[test]
fn test_point_scenario_both() {
    let engine = engine(ResolutionPolicy::Both);
    let out = engine
        .render("${point.x} ${point.x()} ${point.getX} ${point.getX()}", &data())
        .expect("renders");
    assert_eq!(out, "3 3 4 4");
}

#[test]
fn test_point_scenario_method_only() {
    let engine = engine(ResolutionPolicy::MethodOnly);
    assert_eq!(engine.render("${point.getX()}", &data()), Ok("4".to_string()));

    let diagnostic = engine
        .render("${point.getX}", &data())
        .expect_err("a method is not printable");
    assert_eq!(diagnostic.code, diagnostic_codes::EXPECTED_STRINGIFIABLE);

    let value = engine
        .evaluator()
        .evaluate(&tmpl::eval::parse_expression("point.getX", 0).expect("valid"), &data())
        .expect("evaluates");
    assert_eq!(value.as_method().map(ToString::to_string).as_deref(), Some("Point.getX"));
}

#[test]
fn test_point_scenario_property_only() {
    let engine = engine(ResolutionPolicy::PropertyOnly);
    assert_eq!(engine.render("${point.getX}", &data()), Ok("4".to_string()));
    assert_eq!(engine.render("${point.x()}", &data()), Ok("3".to_string()));

    let diagnostic = engine
        .render("x = ${point.getX()}", &data())
        .expect_err("call is rejected");
    assert_eq!(diagnostic.code, diagnostic_codes::EXPECTED_METHOD);
    assert_eq!((diagnostic.start, diagnostic.length), (6, 10));
    let text = diagnostic.to_string();
    assert!(text.starts_with("[E1001] Expected a method, but this has evaluated to a number: point.getX"));
    assert!(text.contains("Tip: \"getX\" is a zero-argument method"), "{text}");
}

#[test]
fn test_record_components_named_like_properties() {
    let engine = engine(ResolutionPolicy::Both);
    let out = engine
        .render(
            "${r.active} ${r.isActive} ${r.isActive()} ${r.name} ${r.getName()}",
            &data(),
        )
        .expect("renders");
    assert_eq!(out, "true true true N N");

    let metadata = engine.wrapper().introspector().metadata(&account_record_type());
    assert!(metadata.is_composite());
    assert_eq!(metadata.classify("active"), Some(MemberClassification::PropertyReader));
    assert_eq!(
        metadata.classify("isActive"),
        Some(MemberClassification::PlainZeroArgMethod)
    );
}

#[test]
fn test_record_components_under_composite_method_only() {
    let engine = Engine::new(
        WrapperConfig::new(ResolutionPolicy::Both).with_composite_policy(ResolutionPolicy::MethodOnly),
    );
    // The derived property stays readable; the component's own name is now a method.
    assert_eq!(engine.render("${r.active}", &data()), Ok("true".to_string()));
    assert_eq!(engine.render("${r.isActive()}", &data()), Ok("true".to_string()));
    assert_eq!(
        engine.render("${r.isActive}", &data()).map_err(|d| d.code),
        Err(diagnostic_codes::EXPECTED_STRINGIFIABLE)
    );
    // Genuine components are unaffected by the override.
    assert_eq!(engine.render("${point.x}", &data()), Ok("3".to_string()));
}

#[test]
fn test_record_components_under_property_only() {
    let engine = engine(ResolutionPolicy::PropertyOnly);
    assert_eq!(engine.render("${r.active()}", &data()), Ok("true".to_string()));
    assert_eq!(
        engine.render("${r.isActive()}", &data()).map_err(|d| d.code),
        Err(diagnostic_codes::EXPECTED_METHOD)
    );
}

#[test]
fn test_engine_from_json_config() {
    let engine = Engine::from_config_json(r#"{"defaultPolicy": "PROPERTY_ONLY"}"#).expect("valid");
    assert_eq!(engine.wrapper().config().default_policy, ResolutionPolicy::PropertyOnly);

    let err = Engine::from_config_json(r#"{"defaultPolicy": 3}"#).expect_err("invalid");
    assert!(format!("{err:#}").contains("loading wrapper configuration"));
}

#[test]
fn test_engine_with_appearance_hook() {
    let engine = Engine::with_appearance_hook(
        WrapperConfig::default(),
        |_ty: &HostType, method: &tmpl::model::MethodDescriptor, decision: &mut AppearanceDecision| {
            if &*method.name == "getX" {
                decision.hidden = true;
            }
        },
    );
    assert_eq!(
        engine.render("${point.getX}", &data()).map_err(|d| d.code),
        Err(diagnostic_codes::NULL_OR_MISSING)
    );
    assert_eq!(engine.render("${point.x}", &data()), Ok("3".to_string()));
}

#[test]
fn test_engine_is_shared_across_threads() {
    let engine = engine(ResolutionPolicy::Both);
    let data = data();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.render("${point.getX()}/${r.name}", &data)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("no panic"), Ok("4/N".to_string()));
        }
    });
    assert_eq!(engine.wrapper().introspector().cached_types(), 2);
}

#[test]
fn test_diagnostic_serializes_with_hints() {
    let diagnostic = engine(ResolutionPolicy::PropertyOnly)
        .render("${point.getX()}", &data())
        .expect_err("rejected");
    let json = serde_json::to_value(&diagnostic).expect("serializable");
    assert_eq!(json["code"], 1001);
    assert_eq!(json["category"], "Error");
    assert_eq!(json["hints"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_name("TREE"), LogFormat::Tree);
    assert_eq!(LogFormat::from_name(" json "), LogFormat::Json);
    assert_eq!(LogFormat::from_name(""), LogFormat::Text);
    assert_eq!(LogFormat::from_name("yaml"), LogFormat::Text);
}

#[test]
fn test_point_renders_the_same_without_composite_support() {
    let restricted = tmpl::CompositeAccessor::new(Arc::new(tmpl::access::RestrictedPlatform::new(
        "composite introspection disabled",
    )));
    let engine = Engine::with_wrapper(
        tmpl::ObjectWrapper::builder()
            .composite_accessor(Arc::new(restricted))
            .build(),
    );
    assert_eq!(
        engine.render("${point.x} ${point.x()} ${point.getX}", &data()),
        Ok("3 3 4".to_string())
    );
    assert_eq!(
        engine.render("${point.x} ${point.x()} ${point.getX}", &data()),
        engine_with_native().render("${point.x} ${point.x()} ${point.getX}", &data())
    );
}

fn engine_with_native() -> Engine {
    Engine::with_wrapper(
        tmpl::ObjectWrapper::builder()
            .composite_accessor(Arc::new(tmpl::CompositeAccessor::native()))
            .build(),
    )
}
