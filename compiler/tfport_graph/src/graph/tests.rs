use super::*;
use crate::{ProviderSchema, ResourceConfig, StaticProviderLoader};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use tfport_ir::{Literal, PropertyValue, Span};

fn empty_properties() -> PropertyValue {
    PropertyValue::Map {
        entries: Vec::new(),
        span: Span::DUMMY,
    }
}

fn instance_schema() -> Schema {
    Schema::object([("ami", Schema::new(Type::STRING))])
}

fn aws_loader() -> StaticProviderLoader {
    StaticProviderLoader::new().with_provider(
        "aws",
        ProviderSchema::new()
            .with_resource("aws_instance", instance_schema())
            .with_data_source("aws_ami", Schema::object([("id", Schema::new(Type::STRING))])),
    )
}

fn add_ok<T>(result: Result<T, DuplicateNode>) -> T {
    match result {
        Ok(id) => id,
        Err(e) => panic!("unexpected duplicate: {e}"),
    }
}

/// Counts loads and delegates to a static loader.
struct CountingLoader {
    inner: StaticProviderLoader,
    loads: AtomicUsize,
}

impl ProviderLoader for CountingLoader {
    fn load(&self, provider: &ProviderNode) -> Result<crate::ProviderSchema, ProviderError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(provider)
    }
}

#[test]
fn lookup_by_reference_names() {
    let mut graph = Graph::new();
    let aws = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let web = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::managed("aws_instance", "web"),
        empty_properties(),
    )));
    let ami = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::data("aws_ami", "ubuntu"),
        empty_properties(),
    )));
    let region = add_ok(graph.add_variable(VariableNode::new("region")));

    assert_eq!(graph.lookup_resource("aws_instance.web"), Some(web));
    assert_eq!(graph.lookup_resource("data.aws_ami.ubuntu"), Some(ami));
    assert_eq!(graph.lookup_resource("aws_ami.ubuntu"), None);
    assert_eq!(graph.lookup_variable("region"), Some(region));
    assert_eq!(graph.lookup_provider("aws"), Some(aws));
    assert_eq!(graph.lookup_module("vpc"), None);
    assert_eq!(graph.lookup_local("prefix"), None);
    assert_eq!(graph.resource(web).config.name, "web");
}

#[test]
fn duplicates_are_rejected() {
    let mut graph = Graph::new();
    add_ok(graph.add_variable(VariableNode::new("region")));
    let err = graph.add_variable(VariableNode::new("region"));
    assert_eq!(
        err,
        Err(DuplicateNode {
            kind: "variable",
            name: "region".to_owned()
        })
    );
}

#[test]
fn aliased_providers_are_distinct() {
    let mut graph = Graph::new();
    let default = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let west = add_ok(graph.add_provider(ProviderNode::new("aws").with_alias("west")));
    assert_ne!(default, west);
    assert_eq!(graph.lookup_provider("aws.west"), Some(west));
}

#[test]
fn iteration_keeps_insertion_order() {
    let mut graph = Graph::new();
    for name in ["a", "b", "c"] {
        add_ok(graph.add_local(LocalNode {
            name: name.to_owned(),
            value: empty_properties(),
        }));
    }
    let names: Vec<_> = graph.locals().map(|(_, l)| l.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    let ids: Vec<_> = graph.locals().map(|(id, _)| id.raw()).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn resource_schema_requires_loaded_provider() {
    let mut graph = Graph::new();
    let aws = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let web = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::managed("aws_instance", "web"),
        empty_properties(),
    )));

    assert_eq!(graph.resource_schema(web), Schema::new(Type::MAP));

    let loader = aws_loader();
    assert_eq!(graph.ensure_provider(web, &loader), Ok(()));
    assert_eq!(graph.resource_schema(web), instance_schema());
}

#[test]
fn data_resources_use_data_source_schemas() {
    let mut graph = Graph::new();
    let aws = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let ami = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::data("aws_ami", "ubuntu"),
        empty_properties(),
    )));
    assert_eq!(graph.ensure_provider(ami, &aws_loader()), Ok(()));
    assert_eq!(
        graph.resource_schema(ami).property_schemas("id").ty(),
        Type::STRING
    );
}

#[test]
fn unknown_resource_type_falls_back_to_map() {
    let mut graph = Graph::new();
    let aws = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let bucket = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::managed("aws_s3_bucket", "logs"),
        empty_properties(),
    )));
    assert_eq!(graph.ensure_provider(bucket, &aws_loader()), Ok(()));
    let schema = graph.resource_schema(bucket);
    assert_eq!(schema.ty(), Type::MAP);
    assert_eq!(schema.property_schemas("arn").ty(), Type::UNKNOWN);
}

#[test]
fn providers_load_once() {
    let mut graph = Graph::new();
    let aws = add_ok(graph.add_provider(ProviderNode::new("aws")));
    let a = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::managed("aws_instance", "a"),
        empty_properties(),
    )));
    let b = add_ok(graph.add_resource(ResourceNode::new(
        aws,
        ResourceConfig::managed("aws_instance", "b"),
        empty_properties(),
    )));

    let loader = CountingLoader {
        inner: aws_loader(),
        loads: AtomicUsize::new(0),
    };
    assert_eq!(graph.ensure_provider(a, &loader), Ok(()));
    assert_eq!(graph.ensure_provider(b, &loader), Ok(()));
    assert_eq!(graph.ensure_provider(a, &loader), Ok(()));
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_loads_are_not_cached() {
    let mut graph = Graph::new();
    let google = add_ok(graph.add_provider(ProviderNode::new("google")));
    let vm = add_ok(graph.add_resource(ResourceNode::new(
        google,
        ResourceConfig::managed("google_compute_instance", "vm"),
        empty_properties(),
    )));

    assert_eq!(
        graph.ensure_provider(vm, &aws_loader()),
        Err(ProviderError::UnknownProvider("google".to_owned()))
    );
    assert!(graph.provider(google).schema().is_none());

    let loader = StaticProviderLoader::new().with_provider("google", ProviderSchema::new());
    assert_eq!(graph.ensure_provider(vm, &loader), Ok(()));
    assert!(graph.provider(google).schema().is_some());
}

#[test]
fn variable_reference_types() {
    assert_eq!(VariableNode::new("a").reference_type(), Type::STRING);
    assert_eq!(
        VariableNode::new("b")
            .with_default(Literal::string("us-east-1"))
            .reference_type(),
        Type::STRING
    );
    assert_eq!(
        VariableNode::new("c")
            .with_default(Literal::Int(3))
            .reference_type(),
        Type::UNKNOWN
    );
    assert_eq!(
        VariableNode::new("d")
            .with_default(Literal::List(vec![]))
            .default_type(),
        Some(Type::UNKNOWN.list_of())
    );
    assert_eq!(VariableNode::new("e").default_type(), None);
}

#[test]
fn node_types_and_names() {
    let mut graph = Graph::new();
    let count = add_ok(graph.add_variable(VariableNode::new("count").with_default(Literal::Int(2))));
    let local = add_ok(graph.add_local(LocalNode {
        name: "prefix".to_owned(),
        value: empty_properties(),
    }));

    assert_eq!(graph.node_type(NodeRef::Variable(count)), Type::UNKNOWN);
    assert_eq!(graph.node_type(local.into()), Type::UNKNOWN.output_of());
    assert_eq!(graph.node_name(local.into()), "local.prefix");
    assert_eq!(graph.node_name(count.into()), "var.count");
}
