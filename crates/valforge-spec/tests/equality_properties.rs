//! Randomized equality/hash consistency checks.
//!
//! Each case builds the same logical specification twice from freshly
//! resolved symbols, once setting fields in declaration order and once in
//! reverse, and checks the two results agree on equality, `Hash` and
//! fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use proptest::prelude::*;
use valforge_core::{
    DeclRef, GeneratedClasses, GenerationConventions, PlainDeclaration, PlainType,
    PropertyNames, StaticSymbolTable, TypeRef,
};
use valforge_spec::{
    BuilderFactory, CodeGeneratorRef, PropertyCodeGenerator, PropertyDescriptor,
    PropertyDescriptorBuilder, Specification, SpecificationBuilder, StandardMethod,
};

#[derive(Debug, PartialEq, Eq, Hash)]
struct KindStrategy {
    kind: u8,
}

impl PropertyCodeGenerator for KindStrategy {
    fn strategy_name(&self) -> &str {
        match self.kind {
            0 => "default",
            1 => "optional",
            _ => "list",
        }
    }
}

#[derive(Debug, Clone)]
struct PropertyCase {
    name: String,
    type_text: &'static str,
    fully_checked_cast: bool,
    strategy: u8,
}

#[derive(Debug, Clone)]
struct SpecCase {
    type_name: String,
    properties: Vec<PropertyCase>,
    methods: Vec<StandardMethod>,
    factory: Option<BuilderFactory>,
    builder_serializable: bool,
    gwt_serializable: bool,
}

const TYPES: [&str; 6] = [
    "int",
    "boolean",
    "java.lang.String",
    "java.util.List<java.lang.String>",
    "java.util.Map<?, ?>",
    "com.example.Address",
];

fn arb_property() -> impl Strategy<Value = PropertyCase> {
    ("[a-z][a-zA-Z0-9]{0,8}", 0..TYPES.len(), any::<bool>(), 0u8..3).prop_map(
        |(name, ty, fully_checked_cast, strategy)| PropertyCase {
            name,
            type_text: TYPES[ty],
            fully_checked_cast,
            strategy,
        },
    )
}

fn arb_method() -> impl Strategy<Value = StandardMethod> {
    prop_oneof![
        Just(StandardMethod::ToString),
        Just(StandardMethod::HashCode),
        Just(StandardMethod::Equals),
    ]
}

fn arb_factory() -> impl Strategy<Value = Option<BuilderFactory>> {
    prop_oneof![
        Just(None),
        Just(Some(BuilderFactory::NoArgsConstructor)),
        Just(Some(BuilderFactory::BuilderMethod)),
        Just(Some(BuilderFactory::NewBuilderMethod)),
    ]
}

fn arb_spec() -> impl Strategy<Value = SpecCase> {
    (
        "[A-Z][a-zA-Z0-9]{0,8}",
        prop::collection::vec(arb_property(), 0..6),
        prop::collection::vec(arb_method(), 0..5),
        arb_factory(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(type_name, properties, methods, factory, builder_serializable, gwt_serializable)| {
                SpecCase {
                    type_name,
                    properties,
                    methods,
                    factory,
                    builder_serializable,
                    gwt_serializable,
                }
            },
        )
}

fn type_ref(text: &str) -> TypeRef {
    if text.contains('.') {
        TypeRef::new(PlainType::new(text))
    } else {
        TypeRef::new(PlainType::primitive(text))
    }
}

fn boxed(text: &str) -> Option<TypeRef> {
    match text {
        "int" => Some(type_ref("java.lang.Integer")),
        "boolean" => Some(type_ref("java.lang.Boolean")),
        _ => None,
    }
}

fn build_property(case: &PropertyCase, reverse: bool) -> PropertyDescriptor {
    let names = PropertyNames::from_name(&case.name, case.type_text == "boolean");
    let mut b = PropertyDescriptorBuilder::new();
    let generator = CodeGeneratorRef::new(KindStrategy {
        kind: case.strategy,
    });
    if reverse {
        b.set_code_generator(generator)
            .set_fully_checked_cast(case.fully_checked_cast)
            .set_names(&names)
            .set_boxed_type(boxed(case.type_text))
            .set_declared_type(type_ref(case.type_text));
    } else {
        b.set_declared_type(type_ref(case.type_text))
            .set_boxed_type(boxed(case.type_text))
            .set_names(&names)
            .set_fully_checked_cast(case.fully_checked_cast)
            .set_code_generator(generator);
    }
    b.build().unwrap()
}

fn build_spec(case: &SpecCase, reverse: bool) -> Specification {
    let declaration = PlainDeclaration::new("com.example", case.type_name.as_str());
    let mut table = StaticSymbolTable::new();
    let declaring_type = table.register_plain(&declaration);
    let builder_type = DeclRef::new(declaration.nested("Builder"));
    let classes = GeneratedClasses::derive(
        "com.example",
        &case.type_name,
        &GenerationConventions::default(),
    )
    .unwrap();
    let properties: Vec<_> = case
        .properties
        .iter()
        .map(|p| build_property(p, reverse))
        .collect();

    let mut b = SpecificationBuilder::new(Arc::new(table));
    if reverse {
        b.set_gwt_serializable(case.gwt_serializable)
            .set_builder_serializable(case.builder_serializable)
            .add_all_underridden_methods(case.methods.iter().rev().copied())
            .set_generated_classes(&classes)
            .set_builder_factory(case.factory)
            .set_builder_type(builder_type)
            .set_declaring_type(declaring_type);
    } else {
        b.set_declaring_type(declaring_type)
            .set_builder_type(builder_type)
            .set_builder_factory(case.factory)
            .set_generated_classes(&classes)
            .add_all_underridden_methods(case.methods.iter().copied())
            .set_builder_serializable(case.builder_serializable)
            .set_gwt_serializable(case.gwt_serializable);
    }
    for property in properties {
        b.add_property(property);
    }
    b.build().unwrap()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn equal_specifications_hash_equally(case in arb_spec()) {
        let a = build_spec(&case, false);
        let b = build_spec(&case, true);
        prop_assert!(!a.declaring_type().same_symbol(b.declaring_type()));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn equal_descriptors_hash_equally(case in arb_property()) {
        let a = build_property(&case, false);
        let b = build_property(&case, true);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn method_set_ignores_repeats(methods in prop::collection::vec(arb_method(), 0..10)) {
        let case = SpecCase {
            type_name: "Person".into(),
            properties: Vec::new(),
            methods: methods.clone(),
            factory: None,
            builder_serializable: false,
            gwt_serializable: false,
        };
        let spec = build_spec(&case, false);
        let mut distinct = methods;
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(spec.underridden_methods().iter().copied().collect::<Vec<_>>(), distinct);
    }
}
