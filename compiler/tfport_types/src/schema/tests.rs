use super::*;
use pretty_assertions::assert_eq;

fn instance_schema() -> Schema {
    Schema::object([
        ("name", Schema::new(Type::STRING)),
        ("port", Schema::new(Type::NUMBER)),
        ("tags", Schema::new(Type::MAP)),
        (
            "ebs_block_device",
            Schema::list(Schema::object([
                ("volume_size", Schema::new(Type::NUMBER)),
                ("encrypted", Schema::new(Type::BOOL)),
            ])),
        ),
        ("security_groups", Schema::list(Schema::new(Type::STRING))),
    ])
}

#[test]
fn declared_property() {
    let schema = instance_schema();
    assert_eq!(schema.property_schemas("name").ty(), Type::STRING);
    assert_eq!(schema.property_schemas("port").ty(), Type::NUMBER);
}

#[test]
fn undeclared_property_is_unknown() {
    let schema = instance_schema();
    assert_eq!(schema.property_schemas("nope"), Schema::unknown());
    assert_eq!(schema.property_schemas("").ty(), Type::UNKNOWN);
}

#[test]
fn leaf_has_no_properties() {
    let leaf = Schema::new(Type::STRING);
    assert_eq!(leaf.property_schemas("length").ty(), Type::UNKNOWN);
}

#[test]
fn list_schema_type_and_elements() {
    let schema = instance_schema();
    let groups = schema.property_schemas("security_groups");
    assert_eq!(groups.ty(), Type::STRING.list_of());
    assert_eq!(groups.property_schemas("0").ty(), Type::STRING);
    assert_eq!(groups.property_schemas("first").ty(), Type::UNKNOWN);
}

#[test]
fn walk_nested_path() {
    let schema = instance_schema();
    let leaf = schema.walk("ebs_block_device.0.volume_size".split('.'));
    assert_eq!(leaf.ty(), Type::NUMBER);

    let missing = schema.walk("ebs_block_device.0.iops".split('.'));
    assert_eq!(missing.ty(), Type::UNKNOWN);
}

#[test]
fn walk_empty_path_is_identity() {
    let schema = instance_schema();
    assert_eq!(schema.walk(std::iter::empty()), schema);
}

#[test]
fn with_property_extends_and_replaces() {
    let schema = Schema::object([("a", Schema::new(Type::BOOL))])
        .with_property("b", Schema::new(Type::STRING))
        .with_property("a", Schema::new(Type::NUMBER));
    assert_eq!(schema.property_schemas("a").ty(), Type::NUMBER);
    assert_eq!(schema.property_schemas("b").ty(), Type::STRING);

    let mut names: Vec<_> = schema.property_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn with_property_does_not_touch_shared_copies() {
    let base = Schema::object([("a", Schema::new(Type::BOOL))]);
    let copy = base.clone();
    let extended = base.with_property("b", Schema::new(Type::STRING));
    assert_eq!(copy.property_schemas("b").ty(), Type::UNKNOWN);
    assert_eq!(extended.property_schemas("b").ty(), Type::STRING);
}
