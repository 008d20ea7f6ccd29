//! Shared schema fixture for unit tests.

use schemaforge_schema::{
    Api, DefaultValue, Field, Namespace, PrimitiveType, Record, TypeName, TypeRef, Union, Variant,
};

fn primitive(primitive: PrimitiveType) -> TypeRef {
    TypeRef::Primitive(primitive)
}

/// Three namespaces covering records, unions, inheritance and a family.
pub fn sample_api() -> Api {
    let common = Namespace::new("common")
        .doc("Shared types.")
        .union(
            Union::new("RetryPolicy")
                .variant(Variant::void("none"))
                .variant(Variant::new(
                    "fixed",
                    TypeRef::named("common", "FixedRetry"),
                )),
        )
        .record(
            Record::new("FixedRetry")
                .field(Field::new("attempts", primitive(PrimitiveType::UInt32)))
                .field(Field::new(
                    "delayMs",
                    TypeRef::nullable(primitive(PrimitiveType::Int64)),
                )),
        );

    let errors = Namespace::new("errors")
        .record(
            Record::new("RateLimitError")
                .doc("Too many requests.")
                .field(Field::new("limit", primitive(PrimitiveType::Int64))),
        )
        .union(
            Union::new("Error")
                .doc("Errors returned by the service.")
                .variant(Variant::void("invalid_arg"))
                .variant(Variant::new(
                    "rate_limit",
                    TypeRef::named("errors", "RateLimitError"),
                ))
                .variant(Variant::new("retry", TypeRef::named("common", "RetryPolicy")))
                .variant(Variant::new("message", primitive(PrimitiveType::String))),
        );

    let account = TypeName::new("accounts", "Account");
    let accounts = Namespace::new("accounts")
        .union(
            Union::new("AccountType")
                .variant(Variant::void("basic"))
                .variant(Variant::void("pro")),
        )
        .record(
            Record::new("Account")
                .doc("A user account.")
                .field(Field::new("accountId", primitive(PrimitiveType::String)))
                .field(Field::new(
                    "name",
                    TypeRef::nullable(primitive(PrimitiveType::String)),
                ))
                .field(
                    Field::new("type", TypeRef::named("accounts", "AccountType"))
                        .default_value(DefaultValue::Tag("basic".to_string())),
                )
                .field(
                    Field::new("active", primitive(PrimitiveType::Boolean))
                        .default_value(DefaultValue::Bool(true)),
                )
                .subtype("basic", TypeName::new("accounts", "BasicAccount"))
                .subtype("full", TypeName::new("accounts", "FullAccount")),
        )
        .record(
            Record::new("BasicAccount")
                .parent(account.clone())
                .field(Field::new("quota", primitive(PrimitiveType::Int64))),
        )
        .record(
            Record::new("FullAccount")
                .parent(account.clone())
                .field(Field::new("seats", primitive(PrimitiveType::UInt32)))
                .field(
                    Field::new("score", primitive(PrimitiveType::Float64))
                        .default_value(DefaultValue::Integer(1)),
                ),
        )
        .record(
            Record::new("TrialAccount")
                .parent(TypeName::new("accounts", "BasicAccount"))
                .field(Field::new("days", primitive(PrimitiveType::Int32))),
        )
        .record(
            Record::new("Session")
                .field(Field::new("id", primitive(PrimitiveType::String)))
                .field(Field::new("owner", TypeRef::Named(account.clone())))
                .field(Field::new("previous", TypeRef::nullable(TypeRef::Named(account))))
                .field(Field::new(
                    "tags",
                    TypeRef::list(primitive(PrimitiveType::String)),
                ))
                .field(Field::new("retry", TypeRef::named("common", "RetryPolicy"))),
        );

    Api::new().namespace(common).namespace(errors).namespace(accounts)
}
