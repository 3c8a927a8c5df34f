use super::*;
use crate::appearance::AppearanceDecision;
use crate::composite::{CompositeAccessor, RestrictedPlatform};
use crate::wrapper::ObjectWrapper;
use tmpl_model::{HostType, HostTypeBuilder, MethodDescriptor, ReturnKind};

struct Point {
    x: i64,
    y: i64,
}

fn point_type() -> Arc<HostType> {
    HostTypeBuilder::<Point>::new("Point")
        .component("x", ReturnKind::Value, |p| Value::from(p.x))
        .component("y", ReturnKind::Value, |p| Value::from(p.y))
        .method("getX", ReturnKind::Value, |p| Ok(Value::from(p.x + 1)))
        .method("broken", ReturnKind::Value, |_| {
            Err(InvocationError::failed("broken", "always fails"))
        })
        .method_with_args("scale", 1, ReturnKind::Value, |p, args| {
            let factor = args[0]
                .as_i64()
                .ok_or_else(|| InvocationError::failed("scale", "factor must be an integer"))?;
            Ok(Value::from(p.x * factor))
        })
        .build()
}

fn point(x: i64, y: i64) -> HostObject {
    HostObject::new(point_type(), Point { x, y }).expect("payload matches")
}

fn wrap(policy: ResolutionPolicy, object: HostObject) -> BeanModel {
    ObjectWrapper::builder()
        .default_policy(policy)
        .composite_accessor(Arc::new(CompositeAccessor::native()))
        .build()
        .wrap(object)
}

fn callable_name(outcome: Option<LookupOutcome>) -> String {
    match outcome {
        Some(LookupOutcome::Callable(method)) => method.name().to_string(),
        other => panic!("expected a callable, got {other:?}"),
    }
}

#[test]
fn test_both_policy() {
    let model = wrap(ResolutionPolicy::Both, point(3, 4));

    assert_eq!(model.get("x"), Ok(Some(Value::Int(3))));
    assert_eq!(model.get("y"), Ok(Some(Value::Int(4))));
    assert_eq!(model.get("getX"), Ok(Some(Value::Int(4))));
    assert_eq!(callable_name(model.get_before_method_call("x").expect("ok")), "x");
    assert_eq!(
        callable_name(model.get_before_method_call("getX").expect("ok")),
        "getX"
    );
}

#[test]
fn test_method_only_policy() {
    let model = wrap(ResolutionPolicy::MethodOnly, point(3, 4));

    // Component readers are unaffected by the policy.
    assert_eq!(model.get("x"), Ok(Some(Value::Int(3))));

    let get_x = model.get("getX").expect("ok").expect("present");
    let method = get_x.as_method().expect("exposed as a method");
    assert_eq!(method.invoke(&[]), Ok(Value::Int(4)));
    assert_eq!(
        callable_name(model.get_before_method_call("getX").expect("ok")),
        "getX"
    );
}

#[test]
fn test_property_only_policy_rejects_calls() {
    let model = wrap(ResolutionPolicy::PropertyOnly, point(3, 4));

    assert_eq!(model.get("getX"), Ok(Some(Value::Int(4))));
    assert_eq!(callable_name(model.get_before_method_call("x").expect("ok")), "x");

    let Some(LookupOutcome::Rejected(rejection)) =
        model.get_before_method_call("getX").expect("ok")
    else {
        panic!("getX() must be rejected under PROPERTY_ONLY");
    };
    assert_eq!(rejection.actual_value(), &Value::Int(4));
    let hint = rejection.hint().expect("hint");
    assert!(hint.contains("\"getX\""), "{hint}");
    assert!(hint.contains("PROPERTY_ONLY"), "{hint}");
}

#[test]
fn test_methods_with_arguments_are_always_callable() {
    for policy in ResolutionPolicy::ALL {
        let model = wrap(policy, point(3, 4));
        let scale = model.get("scale").expect("ok").expect("present");
        assert_eq!(
            scale.as_method().map(|m| m.invoke(&[Value::Int(2)])),
            Some(Ok(Value::Int(6)))
        );
        assert_eq!(
            callable_name(model.get_before_method_call("scale").expect("ok")),
            "scale"
        );
    }
}

#[test]
fn test_missing_key() {
    let model = wrap(ResolutionPolicy::Both, point(3, 4));
    assert_eq!(model.get("z"), Ok(None));
    assert_eq!(model.get_before_method_call("z"), Ok(None));
}

#[test]
fn test_member_failure_is_reported_with_key() {
    let model = wrap(ResolutionPolicy::Both, point(3, 4));
    let err = model.get("broken").expect_err("body fails");
    let LookupError::Read { key, type_name, .. } = &err;
    assert_eq!(key, "broken");
    assert_eq!(type_name, "Point");
    assert!(err.to_string().contains("always fails"));

    // Calling it defers the failure to the call itself.
    let Some(LookupOutcome::Callable(method)) =
        model.get_before_method_call("broken").expect("ok")
    else {
        panic!("expected a callable");
    };
    assert!(method.invoke(&[]).is_err());

    let property_only = wrap(ResolutionPolicy::PropertyOnly, point(3, 4));
    assert!(property_only.get_before_method_call("broken").is_err());
}

#[test]
fn test_hook_rejection_reports_plain_value() {
    let model = ObjectWrapper::builder()
        .composite_accessor(Arc::new(CompositeAccessor::native()))
        .appearance_hook(
            |_ty: &HostType, method: &MethodDescriptor, decision: &mut AppearanceDecision| {
                if &*method.name == "scale" {
                    decision.method_before_call = false;
                }
            },
        )
        .build()
        .wrap(point(3, 4));

    let Some(LookupOutcome::Rejected(rejection)) =
        model.get_before_method_call("scale").expect("ok")
    else {
        panic!("scale() must be rejected");
    };
    let (value, hint) = rejection.into_parts();
    assert_eq!(value.as_method().map(MethodRef::name), Some("scale"));
    assert_eq!(
        hint.as_deref(),
        Some("\"scale\" can only be read as a value; write it without the \"()\".")
    );
}

#[test]
fn test_instances_share_type_metadata() {
    let wrapper = ObjectWrapper::builder()
        .composite_accessor(Arc::new(CompositeAccessor::native()))
        .build();
    let ty = point_type();
    let first = wrapper.wrap(HostObject::new(Arc::clone(&ty), Point { x: 1, y: 2 }).expect("ok"));
    let second = wrapper.wrap(HostObject::new(ty, Point { x: 5, y: 6 }).expect("ok"));

    assert!(Arc::ptr_eq(first.metadata(), second.metadata()));
    assert_eq!(first.get("x"), Ok(Some(Value::Int(1))));
    assert_eq!(second.get("x"), Ok(Some(Value::Int(5))));
    assert_eq!(first.classify("y"), Some(MemberClassification::CompositeComponentReader));
}

#[test]
fn test_accessor_names_resolve_literally_without_composite_support() {
    let restricted = Arc::new(CompositeAccessor::new(Arc::new(RestrictedPlatform::new(
        "no composite introspection",
    ))));
    for policy in [ResolutionPolicy::Both, ResolutionPolicy::MethodOnly] {
        let model = ObjectWrapper::builder()
            .default_policy(policy)
            .composite_accessor(Arc::clone(&restricted))
            .build()
            .wrap(point(3, 4));

        assert_eq!(callable_name(model.get_before_method_call("x").expect("ok")), "x");
        if policy == ResolutionPolicy::Both {
            assert_eq!(model.get("x"), Ok(Some(Value::Int(3))));
            assert_eq!(model.get("getX"), Ok(Some(Value::Int(4))));
        }
    }
}
