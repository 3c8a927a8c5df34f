use super::*;

#[test]
fn test_plain_methods_follow_policy_table() {
    let plain = MemberClassification::PlainZeroArgMethod;

    assert_eq!(
        resolve_appearance(ResolutionPolicy::Both, plain),
        MemberAppearance::new(ValuePosition::Invoke, CallPosition::Callable)
    );
    assert_eq!(
        resolve_appearance(ResolutionPolicy::MethodOnly, plain),
        MemberAppearance::new(ValuePosition::Callable, CallPosition::Callable)
    );
    assert_eq!(
        resolve_appearance(ResolutionPolicy::PropertyOnly, plain),
        MemberAppearance::new(ValuePosition::Invoke, CallPosition::Reject)
    );
}

#[test]
fn test_readers_are_policy_independent() {
    for policy in ResolutionPolicy::ALL {
        for classification in [
            MemberClassification::PropertyReader,
            MemberClassification::CompositeComponentReader,
        ] {
            let appearance = resolve_appearance(policy, classification);
            assert_eq!(
                appearance.value_position,
                ValuePosition::Invoke,
                "{classification:?} under {policy}"
            );
            assert_eq!(appearance.call_position, CallPosition::Callable);
        }
    }
}

#[test]
fn test_other_methods_are_always_callables() {
    for policy in ResolutionPolicy::ALL {
        assert_eq!(
            resolve_appearance(policy, MemberClassification::Other),
            MemberAppearance::new(ValuePosition::Callable, CallPosition::Callable)
        );
    }
}

#[test]
fn test_default_policy_is_both() {
    assert_eq!(ResolutionPolicy::default(), ResolutionPolicy::Both);
}

#[test]
fn test_parse_policy_names() {
    assert_eq!("BOTH".parse::<ResolutionPolicy>().ok(), Some(ResolutionPolicy::Both));
    assert_eq!(
        "both_property_and_method".parse::<ResolutionPolicy>().ok(),
        Some(ResolutionPolicy::Both)
    );
    assert_eq!(
        "method-only".parse::<ResolutionPolicy>().ok(),
        Some(ResolutionPolicy::MethodOnly)
    );
    assert_eq!(
        " PROPERTY_ONLY ".parse::<ResolutionPolicy>().ok(),
        Some(ResolutionPolicy::PropertyOnly)
    );

    let err = "sometimes".parse::<ResolutionPolicy>().expect_err("unknown name");
    assert!(matches!(err, ConfigError::UnknownPolicy(ref name) if name == "sometimes"));
}

#[test]
fn test_display_matches_serialized_name() {
    for policy in ResolutionPolicy::ALL {
        let json = serde_json::to_string(&policy).expect("serializable");
        assert_eq!(json, format!("\"{policy}\""));
        assert_eq!(policy.to_string().parse::<ResolutionPolicy>().ok(), Some(policy));
    }
}
