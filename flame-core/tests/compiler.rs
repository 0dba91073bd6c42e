#[cfg(test)]
mod tests {
    use flame_core::{ParamType, compile};
    use indoc::indoc;
    use std::collections::HashMap;

    #[test]
    fn no_placeholders() {
        for sql in [
            "SELECT 1",
            "",
            "SELECT * FROM users WHERE name = 'Ada'",
            "UPDATE t SET a = 1 WHERE b < 2;",
        ] {
            let compiled = compile(sql);
            assert_eq!(compiled.sql, sql);
            assert!(compiled.placeholders.is_empty());
            assert!(compiled.types.is_empty());
        }
    }

    #[test]
    fn positional_rewrite() {
        let compiled = compile("SELECT * FROM t WHERE a = :x AND b = i:y");
        assert_eq!(compiled.sql, "SELECT * FROM t WHERE a = ? AND b = ?");
        assert_eq!(compiled.placeholders, ["x", "y"]);
        assert_eq!(
            compiled.types,
            HashMap::from([
                ("x".to_string(), ParamType::String),
                ("y".to_string(), ParamType::Int),
            ])
        );
    }

    #[test]
    fn first_occurrence_sets_the_type() {
        let compiled = compile("SELECT * FROM events WHERE start > d:foo OR end < :foo");
        assert_eq!(compiled.param_type("foo"), Some(ParamType::DateTime));
        assert_eq!(compiled.placeholders, ["foo", "foo"]);
        assert_eq!(compiled.types.len(), 1);

        let compiled = compile(":a i:a f:a");
        assert_eq!(compiled.sql, "? ? ?");
        assert_eq!(compiled.param_type("a"), Some(ParamType::String));
    }

    #[test]
    fn every_prefix() {
        let compiled = compile("s:s b:b i:i l:l f:f d:d t:t :none");
        assert_eq!(compiled.sql, "? ? ? ? ? ? ? ?");
        assert_eq!(compiled.param_type("s"), Some(ParamType::String));
        assert_eq!(compiled.param_type("b"), Some(ParamType::Bool));
        assert_eq!(compiled.param_type("i"), Some(ParamType::Int));
        assert_eq!(compiled.param_type("l"), Some(ParamType::Lob));
        assert_eq!(compiled.param_type("f"), Some(ParamType::Float));
        assert_eq!(compiled.param_type("d"), Some(ParamType::DateTime));
        assert_eq!(compiled.param_type("t"), Some(ParamType::Time));
        assert_eq!(compiled.param_type("none"), Some(ParamType::String));
        assert_eq!(compiled.param_type("missing"), None);
    }

    #[test]
    fn unknown_prefix_is_kept() {
        let compiled = compile("SELECT x:foo, y:bar");
        assert_eq!(compiled.sql, "SELECT x?, y?");
        assert_eq!(compiled.placeholders, ["foo", "bar"]);
        assert_eq!(compiled.param_type("foo"), Some(ParamType::String));
    }

    #[test]
    fn names_are_case_sensitive() {
        let compiled = compile(":Name = :name");
        assert_eq!(compiled.placeholders, ["Name", "name"]);
        assert_eq!(compiled.types.len(), 2);
    }

    #[test]
    fn names_stop_at_non_word_characters() {
        let compiled = compile("WHERE a IN (:first,:second) AND b = :user_id2-1");
        assert_eq!(compiled.sql, "WHERE a IN (?,?) AND b = ?-1");
        assert_eq!(compiled.placeholders, ["first", "second", "user_id2"]);
    }

    #[test]
    fn double_colon_cast() {
        let compiled = compile("SELECT :value::text");
        assert_eq!(compiled.sql, "SELECT ?:?");
        assert_eq!(compiled.placeholders, ["value", "text"]);
    }

    #[test]
    fn lone_colon_is_copied() {
        let compiled = compile("SELECT ':' || name, i: FROM t");
        assert_eq!(compiled.sql, "SELECT ':' || name, i: FROM t");
        assert!(compiled.placeholders.is_empty());
    }

    #[test]
    fn multiline() {
        let compiled = compile(indoc! {"
            INSERT INTO trades (symbol, price, quantity, at)
            VALUES (:symbol, f:price, i:quantity, d:at)
        "});
        assert_eq!(
            compiled.sql,
            indoc! {"
                INSERT INTO trades (symbol, price, quantity, at)
                VALUES (?, ?, ?, ?)
            "}
        );
        assert_eq!(compiled.placeholders, ["symbol", "price", "quantity", "at"]);
        assert_eq!(compiled.param_type("price"), Some(ParamType::Float));
    }
}
