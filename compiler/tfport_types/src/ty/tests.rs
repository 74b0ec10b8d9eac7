use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn default_is_unknown() {
    assert_eq!(Type::default(), Type::UNKNOWN);
    assert!(Type::default().is_unknown());
}

#[test]
fn list_element_round_trip() {
    assert!(Type::STRING.list_of().is_list());
    assert!(!Type::STRING.is_list());
    assert_eq!(Type::STRING.list_of().element_type(), Type::STRING);
    assert_eq!(Type::UNKNOWN.list_of().element_type(), Type::UNKNOWN);
}

#[test]
fn element_type_of_non_list_is_unknown() {
    assert_eq!(Type::STRING.element_type(), Type::UNKNOWN);
    assert_eq!(Type::MAP.output_of().element_type(), Type::UNKNOWN);
}

#[test]
fn wrappers_are_idempotent() {
    assert_eq!(Type::NUMBER.list_of().list_of(), Type::NUMBER.list_of());
    assert_eq!(Type::NUMBER.output_of().output_of(), Type::NUMBER.output_of());
}

#[test]
fn wrappers_commute() {
    assert_eq!(
        Type::STRING.output_of().list_of(),
        Type::STRING.list_of().output_of()
    );
}

#[test]
fn element_of_splat_keeps_output() {
    let splat = Type::STRING.output_of().list_of();
    assert_eq!(splat.element_type(), Type::STRING.output_of());
}

#[test]
fn primitive_strips_modifiers() {
    assert_eq!(Type::BOOL.list_of().output_of().primitive(), Type::BOOL);
}

#[test]
fn display() {
    assert_eq!(Type::STRING.to_string(), "string");
    assert_eq!(Type::NUMBER.list_of().to_string(), "list(number)");
    assert_eq!(Type::MAP.output_of().to_string(), "output(map)");
    assert_eq!(
        Type::UNKNOWN.list_of().output_of().to_string(),
        "output(list(unknown))"
    );
    assert_eq!(format!("{:?}", Type::BOOL), "Type(bool)");
}

fn any_primitive() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::UNKNOWN),
        Just(Type::BOOL),
        Just(Type::NUMBER),
        Just(Type::STRING),
        Just(Type::MAP),
    ]
}

proptest! {
    #[test]
    fn list_of_then_element_type_is_identity(t in any_primitive(), output in any::<bool>()) {
        let t = if output { t.output_of() } else { t };
        prop_assert_eq!(t.list_of().element_type(), t);
    }

    #[test]
    fn structural_equality_follows_construction(a in any_primitive(), b in any_primitive()) {
        prop_assert_eq!(a.list_of() == b.list_of(), a == b);
        prop_assert_eq!(a.output_of() == b.output_of(), a == b);
    }
}
