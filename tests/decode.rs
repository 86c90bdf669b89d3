#[cfg(test)]
mod tests {
    use quarry::{
        ColumnType, Config, ConfigError, DecodeFn, DecodePlan, EntitySchema, Generator, HostKind,
        HostType, RawFieldDecl, RowLabeled, Value,
    };
    use quarry_tests::{Post, init_logs, labeled};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::datetime;

    fn id() -> RawFieldDecl {
        RawFieldDecl::new("id", HostKind::I32)
            .column_type(ColumnType::Int)
            .primary_key()
    }

    fn other(name: &str) -> HostType {
        HostType::new(HostKind::Other(name.into()))
    }

    #[test]
    fn plan_minimal() {
        init_logs();
        let schema = EntitySchema::resolve(
            "Entity",
            Some(""),
            [
                id(),
                RawFieldDecl::new("name", HostKind::String)
                    .column_type(ColumnType::Varchar)
                    .size(50),
            ],
        )
        .unwrap();
        let plan = DecodePlan::plan(schema.fields());
        let plan: Vec<_> = plan.iter().map(|(c, d)| (c, d.identifier())).collect();
        assert_eq!(plan, [("id", "integer"), ("name", "text")]);
    }

    #[test]
    fn plan_fixture() {
        let decl = Post::decl();
        let unit = Generator::default()
            .generate_entity(&decl.name, decl.table.as_deref(), decl.fields)
            .unwrap();
        let plan: Vec<_> = unit.decode_plan.iter().collect();
        assert_eq!(
            plan,
            [
                ("id", DecodeFn::Long),
                ("user_id", DecodeFn::Integer),
                ("title", DecodeFn::Text),
                ("body", DecodeFn::Text),
                ("created_at", DecodeFn::Timestamp),
            ]
        );
    }

    #[test]
    fn host_type_first() {
        let schema = EntitySchema::resolve(
            "Entity",
            None,
            [
                id(),
                RawFieldDecl::new("big", HostKind::I64).column_type(ColumnType::Int),
                RawFieldDecl::new("flag", HostKind::Bool).column_type(ColumnType::TinyInt),
                RawFieldDecl::new("small", HostKind::I16).column_type(ColumnType::SmallInt),
                RawFieldDecl::new("ratio", HostKind::F32).column_type(ColumnType::Double),
            ],
        )
        .unwrap();
        let plan: Vec<_> = DecodePlan::plan(schema.fields())
            .iter()
            .map(|(_, d)| d)
            .collect();
        assert_eq!(
            plan,
            [
                DecodeFn::Integer,
                DecodeFn::Long,
                DecodeFn::Boolean,
                DecodeFn::Short,
                DecodeFn::Float
            ]
        );
    }

    #[test]
    fn sql_type_fallback() {
        assert_eq!(DecodeFn::for_sql_type("INT"), Some(DecodeFn::Integer));
        assert_eq!(DecodeFn::for_sql_type("integer"), Some(DecodeFn::Integer));
        assert_eq!(DecodeFn::for_sql_type("VARCHAR(50)"), Some(DecodeFn::Text));
        assert_eq!(DecodeFn::for_sql_type("CHAR(1)"), Some(DecodeFn::Text));
        assert_eq!(DecodeFn::for_sql_type("JSON"), Some(DecodeFn::Text));
        assert_eq!(DecodeFn::for_sql_type("TINYINT"), Some(DecodeFn::Boolean));
        assert_eq!(DecodeFn::for_sql_type("FLOAT"), Some(DecodeFn::Float));
        assert_eq!(DecodeFn::for_sql_type("BIGINT"), Some(DecodeFn::Long));
        assert_eq!(DecodeFn::for_sql_type("SMALLINT"), Some(DecodeFn::Short));
        assert_eq!(DecodeFn::for_sql_type("DECIMAL(10)"), Some(DecodeFn::Double));
        assert_eq!(DecodeFn::for_sql_type("TIMESTAMP"), Some(DecodeFn::Timestamp));
        assert_eq!(DecodeFn::for_sql_type("DATE"), None);
        assert_eq!(DecodeFn::for_sql_type("BLOB"), None);

        let schema = EntitySchema::resolve(
            "Entity",
            None,
            [
                id(),
                RawFieldDecl::new("amount", other("rust_decimal::Decimal"))
                    .column_type(ColumnType::Decimal),
                RawFieldDecl::new("level", other("u8")).column_type(ColumnType::TinyInt),
                RawFieldDecl::new("doc", other("serde_json::Value")).column_type(ColumnType::Json),
            ],
        )
        .unwrap();
        let plan: Vec<_> = DecodePlan::plan(schema.fields())
            .iter()
            .map(|(_, d)| d)
            .collect();
        assert_eq!(
            plan,
            [
                DecodeFn::Integer,
                DecodeFn::Double,
                DecodeFn::Boolean,
                DecodeFn::Text
            ]
        );
    }

    #[test]
    fn opaque_fallback() {
        let schema = EntitySchema::resolve(
            "Event",
            None,
            [
                id(),
                RawFieldDecl::new("day", other("time::Date")).column_type(ColumnType::Date),
                RawFieldDecl::new("payload", other("Vec<u8>")).column_type(ColumnType::Blob),
            ],
        )
        .unwrap();
        let plan = DecodePlan::plan(schema.fields());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.steps[1].decode, DecodeFn::Opaque);
        assert_eq!(plan.steps[2].decode, DecodeFn::Opaque);
        assert_eq!(plan.steps[2].decode.to_string(), "opaque");

        assert_eq!(
            DecodePlan::plan_strict(schema.fields()),
            Err(ConfigError::UntypedColumn("day".into(), "DATE".into()))
        );
        let generator = Generator::new(Config::default().strict_decode(true));
        assert!(matches!(
            generator.generate(&schema),
            Err(ConfigError::UntypedColumn(..))
        ));
        assert!(Generator::default().generate(&schema).is_ok());
    }

    #[test]
    fn decode_values() {
        assert_eq!(
            DecodeFn::Integer.decode(Value::Int64(Some(7))).unwrap(),
            Value::Int32(Some(7))
        );
        assert!(DecodeFn::Integer.decode(Value::Int64(Some(i64::MAX))).is_err());
        assert_eq!(
            DecodeFn::Integer.decode(Value::Null).unwrap(),
            Value::Int32(None)
        );
        assert_eq!(
            DecodeFn::Timestamp
                .decode(Value::Varchar(Some("2024-01-02 03:04:05".into())))
                .unwrap(),
            Value::Timestamp(Some(datetime!(2024-01-02 03:04:05)))
        );
        assert_eq!(
            DecodeFn::Double
                .decode(Value::Decimal(Some(Decimal::from_str("12.5").unwrap())))
                .unwrap(),
            Value::Float64(Some(12.5))
        );
        assert_eq!(
            DecodeFn::Boolean.decode(Value::Int8(Some(1))).unwrap(),
            Value::Boolean(Some(true))
        );
        assert_eq!(
            DecodeFn::Short.decode(Value::Int32(Some(-300))).unwrap(),
            Value::Int16(Some(-300))
        );
        assert_eq!(
            DecodeFn::Long.decode(Value::Varchar(Some(" 42 ".into()))).unwrap(),
            Value::Int64(Some(42))
        );
        assert_eq!(
            DecodeFn::Text.decode(Value::Varchar(Some("x".into()))).unwrap(),
            Value::Varchar(Some("x".into()))
        );
        assert!(DecodeFn::Text.decode(Value::Int32(Some(1))).is_err());
        assert_eq!(
            DecodeFn::Opaque.decode(Value::Blob(Some([1u8, 2].into()))).unwrap(),
            Value::Blob(Some([1u8, 2].into()))
        );
    }

    #[test]
    fn decode_rows() {
        let schema = EntitySchema::resolve(
            "Entity",
            None,
            [
                id(),
                RawFieldDecl::new("name", HostKind::String).column_type(ColumnType::Text),
            ],
        )
        .unwrap();
        let plan = DecodePlan::plan(schema.fields());
        let row = labeled(
            &["id", "name"],
            [Value::Int64(Some(1)), Value::Varchar(Some("one".into()))],
        );
        assert_eq!(
            &*plan.decode(row).unwrap(),
            [Value::Int32(Some(1)), Value::Varchar(Some("one".into()))]
        );

        let short = labeled(&["id"], [Value::Int32(Some(1))]);
        assert!(plan.decode(short).is_err());
        assert!(plan.decode(RowLabeled::default()).is_err());

        let invalid = labeled(
            &["id", "name"],
            [Value::Varchar(Some("abc".into())), Value::Null],
        );
        let error = plan.decode(invalid).unwrap_err();
        assert!(format!("{:#}", error).contains("`id`"));
    }
}
