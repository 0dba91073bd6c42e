#[cfg(test)]
mod tests {
    use flame_core::{
        Context, Filter, Fragment, GenericGrammar, Grammar, MySqlGrammar, ParamType, Predicate,
        Value,
    };
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

    const GENERIC: GenericGrammar = GenericGrammar;
    const MYSQL: MySqlGrammar = MySqlGrammar;

    #[test]
    fn quote_identifier() {
        assert_eq!(GENERIC.quote_identifier("users"), "\"users\"");
        assert_eq!(GENERIC.quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(GENERIC.quote_identifier("u.name"), "\"u\".\"name\"");
        assert_eq!(GENERIC.quote_identifier("u.*"), "\"u\".*");
        assert_eq!(GENERIC.quote_identifier("*"), "*");
        assert_eq!(MYSQL.quote_identifier("users"), "`users`");
        assert_eq!(MYSQL.quote_identifier("we`ird"), "`we``ird`");
        assert_eq!(MYSQL.quote_identifier("db.table"), "`db`.`table`");
    }

    #[test]
    fn quoting_is_pure_but_not_idempotent() {
        for grammar in [GENERIC.as_dyn(), MYSQL.as_dyn()] {
            for id in ["id", "order", "a b", "x\"y", "ü"] {
                let quoted = grammar.quote_identifier(id);
                assert_eq!(grammar.quote_identifier(id), quoted);
                assert_ne!(grammar.quote_identifier(&quoted), quoted);
            }
        }
    }

    #[test]
    fn parameters_are_generated() {
        let mut context = Context::new(Fragment::SqlSelectWhere);
        let mut out = String::new();
        let filter = Filter::new()
            .eq("a", 1)
            .or(Predicate::compare("b", flame_core::ComparisonOp::Like, "x%"))
            .and(Predicate::Null {
                column: "c".into(),
                negated: true,
            });
        GENERIC.write_filter(&mut context, &mut out, &filter);
        assert_eq!(out, "\"a\" = i:p1 OR \"b\" LIKE :p2 AND \"c\" IS NOT NULL");
        assert_eq!(context.parameters.len(), 2);
        assert_eq!(context.parameters.get("p1"), Some(&Value::Int32(1)));
        assert_eq!(
            context.parameters.get("p2"),
            Some(&Value::Varchar("x%".into()))
        );
    }

    #[test]
    fn generated_names_skip_bound_ones() {
        let mut parameters = flame_core::Parameters::new();
        parameters.insert("p1", "taken");
        let mut context = Context::with_parameters(Fragment::None, parameters);
        let mut out = String::new();
        GENERIC.write_parameter(&mut context, &mut out, &Value::Float64(1.5));
        assert_eq!(out, "f:p2");
        assert_eq!(context.parameters.len(), 2);
    }

    #[test]
    fn value_types_map_to_prefixes() {
        let date = Date::from_calendar_date(2020, Month::January, 1).unwrap();
        for (value, prefix) in [
            (Value::Null, ""),
            (Value::Varchar("a".into()), ""),
            (Value::Boolean(true), "b"),
            (Value::UInt64(1), "i"),
            (Value::Float32(1.0), "f"),
            (Value::Blob([1u8].into()), "l"),
            (Value::Date(date), ""),
            (Value::Timestamp(date.midnight()), "d"),
            (Value::Time(Time::MIDNIGHT), "t"),
        ] {
            assert_eq!(ParamType::of_value(&value).prefix(), prefix, "{:?}", value);
        }
    }

    #[test]
    fn bind_representations() {
        let date = Date::from_calendar_date(1999, Month::December, 31).unwrap();
        let mut out = String::new();
        GENERIC.write_bind_date(&mut out, &date);
        assert_eq!(out, "1999-12-31");

        let mut out = String::new();
        GENERIC.write_bind_time(&mut out, &Time::from_hms_micro(23, 59, 1, 120).unwrap());
        assert_eq!(out, "23:59:01.00012");

        let mut out = String::new();
        GENERIC.write_bind_timestamp(
            &mut out,
            &PrimitiveDateTime::new(date, Time::from_hms(8, 0, 0).unwrap()),
        );
        assert_eq!(out, "1999-12-31 08:00:00");

        let mut out = String::new();
        let value: OffsetDateTime = PrimitiveDateTime::new(date, Time::from_hms(23, 30, 0).unwrap())
            .assume_offset(UtcOffset::from_hms(-1, 0, 0).unwrap());
        GENERIC.write_bind_timestamptz(&mut out, &value);
        assert_eq!(out, "2000-01-01 00:30:00");
    }

    #[test]
    fn limit_offset() {
        let mut context = Context::default();
        let mut out = String::new();
        GENERIC.write_limit_offset(&mut context, &mut out, Some(10), Some(20));
        assert_eq!(out, "\nLIMIT 10\nOFFSET 20");

        let mut out = String::new();
        MYSQL.write_limit_offset(&mut context, &mut out, Some(10), Some(20));
        assert_eq!(out, "\nLIMIT 20, 10");

        let mut out = String::new();
        MYSQL.write_limit_offset(&mut context, &mut out, None, Some(5));
        assert_eq!(out, format!("\nLIMIT 5, {}", u64::MAX));
    }

    #[test]
    fn transaction_statements() {
        let mut out = String::new();
        GENERIC.write_transaction_begin(&mut out);
        GENERIC.write_transaction_commit(&mut out);
        GENERIC.write_transaction_rollback(&mut out);
        assert_eq!(out, "BEGIN;COMMIT;ROLLBACK;");
        let mut out = String::new();
        MYSQL.write_transaction_begin(&mut out);
        assert_eq!(out, "START TRANSACTION;");
    }
}
