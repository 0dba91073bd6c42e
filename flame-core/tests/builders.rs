mod mock;

#[cfg(test)]
mod tests {
    use crate::mock::{Call, MockConnection, MockDriver, connect};
    use flame_core::{
        Connection, DriverConnection, JoinType, MySqlGrammar, Order, ParamType, QueryBuilder,
        Value, WhereClause,
    };
    use indoc::indoc;
    use std::sync::Arc;

    #[test]
    fn select_without_columns() {
        let (connection, _) = connect();
        assert_eq!(connection.select::<&str>([]).to_string(), "SELECT *;");
        let (sql, parameters) = connection.select::<&str>([]).from("users").build();
        assert_eq!(sql, "SELECT *\nFROM \"users\";");
        assert!(parameters.is_empty());
    }

    #[test]
    fn select_full() {
        let (connection, _) = connect();
        let (sql, parameters) = connection
            .select(["u.id", "u.name"])
            .distinct()
            .column_as("o.total", "amount")
            .column_raw("COUNT(*)", Some("orders"))
            .from_as("users", "u")
            .left_join(("orders", "o"), "o.user_id", "u.id")
            .where_gt("u.age", 18)
            .where_in("u.country", ["IT", "FR"])
            .or_where_null("u.country")
            .group_by(["u.id", "u.name"])
            .having_gt("orders", 2)
            .order_by("u.name", Order::ASC)
            .order_by("u.id", Order::DESC)
            .limit(10)
            .offset(30)
            .build();
        assert_eq!(
            sql,
            indoc! {r#"
                SELECT DISTINCT "u"."id", "u"."name", "o"."total" AS "amount", COUNT(*) AS "orders"
                FROM "users" "u"
                LEFT JOIN "orders" "o" ON "o"."user_id" = "u"."id"
                WHERE "u"."age" > i:p1 AND "u"."country" IN (:p2, :p3) OR "u"."country" IS NULL
                GROUP BY "u"."id", "u"."name"
                HAVING "orders" > i:p4
                ORDER BY "u"."name" ASC, "u"."id" DESC
                LIMIT 10
                OFFSET 30;
            "#}
            .trim()
        );
        assert_eq!(parameters.len(), 4);
        assert_eq!(parameters.get("p1"), Some(&Value::Int32(18)));
        assert_eq!(parameters.get("p3"), Some(&Value::Varchar("FR".into())));
        assert_eq!(parameters.get("p4"), Some(&Value::Int32(2)));
    }

    #[test]
    fn select_groups_and_raw() {
        let (connection, _) = connect();
        let (sql, parameters) = connection
            .select(["id"])
            .from("products")
            .where_raw("price * :rate > 100")
            .where_group(|f| f.eq("kind", "book").or(flame_core::Predicate::Raw("stock > 0".into())))
            .where_between("created", "2024-01-01", "2024-12-31")
            .where_in("id", Vec::<i32>::new())
            .bind("rate", 1.2)
            .build();
        assert_eq!(
            sql,
            indoc! {r#"
                SELECT "id"
                FROM "products"
                WHERE (price * :rate > 100) AND ("kind" = :p1 OR (stock > 0)) AND "created" BETWEEN :p2 AND :p3 AND 1 = 0;
            "#}
            .trim()
        );
        assert_eq!(parameters.get("rate"), Some(&Value::Float64(1.2)));
        assert_eq!(parameters.len(), 4);
    }

    #[test]
    fn joins() {
        let (connection, _) = connect();
        let sql = connection
            .select(["a.x"])
            .from("a")
            .join("b", "b.a_id", "a.id")
            .right_join("c", "c.b_id", "b.id")
            .join_raw(JoinType::Inner, "d", "d.id = a.d_id AND d.active")
            .cross_join("e")
            .to_string();
        assert_eq!(
            sql,
            indoc! {r#"
                SELECT "a"."x"
                FROM "a"
                INNER JOIN "b" ON "b"."a_id" = "a"."id"
                RIGHT JOIN "c" ON "c"."b_id" = "b"."id"
                INNER JOIN "d" ON d.id = a.d_id AND d.active
                CROSS JOIN "e";
            "#}
            .trim()
        );
    }

    #[test]
    fn insert() {
        let (connection, _) = connect();
        let (sql, parameters) = connection
            .insert("trades", ["symbol", "price", "quantity"])
            .values([Value::from("AAPL"), 190.5.into(), 10.into()])
            .values([Value::from("MSFT"), 410.0.into()])
            .build();
        assert_eq!(
            sql,
            indoc! {r#"
                INSERT INTO "trades" ("symbol", "price", "quantity") VALUES
                (:p1, f:p2, i:p3),
                (:p4, f:p5, :p6);
            "#}
            .trim()
        );
        assert_eq!(parameters.get("p6"), Some(&Value::Null));

        let (sql, parameters) = connection
            .insert("users", Vec::<String>::new())
            .set("name", "Ada")
            .set("age", 36)
            .set("name", "Grace")
            .build();
        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"name\", \"age\") VALUES\n(:p1, i:p2);"
        );
        assert_eq!(parameters.get("p1"), Some(&Value::Varchar("Grace".into())));

        let sql = connection.insert("logs", Vec::<String>::new()).to_string();
        assert_eq!(sql, "INSERT INTO \"logs\" DEFAULT VALUES;");
    }

    #[test]
    fn update() {
        let (connection, _) = connect();
        let (sql, parameters) = connection
            .update("users", [("name", "Ada")])
            .set("active", true)
            .set_raw("logins", "logins + 1")
            .set("name", "Grace")
            .where_eq("id", 7)
            .or_where_eq("email", Value::Null)
            .build();
        assert_eq!(
            sql,
            indoc! {r#"
                UPDATE "users" SET
                "name" = :p1,
                "active" = b:p2,
                "logins" = logins + 1
                WHERE "id" = i:p3 OR "email" IS NULL;
            "#}
            .trim()
        );
        assert_eq!(parameters.get("p1"), Some(&Value::Varchar("Grace".into())));
        assert_eq!(parameters.len(), 3);

        let sql = connection
            .update("jobs", [("state", "done")])
            .where_ne("state", "done")
            .order_by("created", Order::ASC)
            .limit(5)
            .to_string();
        assert_eq!(
            sql,
            indoc! {r#"
                UPDATE "jobs" SET
                "state" = :p1
                WHERE "state" <> :p2;
            "#}
            .trim()
        );
    }

    #[test]
    fn update_order_and_limit_in_mysql() {
        let connection = Connection::<MockDriver>::with_grammar(
            MockConnection::connect("mock://").unwrap(),
            Arc::new(MySqlGrammar::new()),
        );
        let sql = connection
            .update("jobs", [("state", "done")])
            .where_ne("state", "done")
            .order_by("created", Order::ASC)
            .limit(5)
            .to_string();
        assert_eq!(
            sql,
            indoc! {"
                UPDATE `jobs` SET
                `state` = :p1
                WHERE `state` <> :p2
                ORDER BY `created` ASC
                LIMIT 5;
            "}
            .trim()
        );
    }

    #[test]
    fn empty_groups_are_skipped() {
        let (connection, _) = connect();
        let sql = connection
            .select(["id"])
            .from("t")
            .where_group(|f| f)
            .where_eq("a", 1)
            .or_where_group(|f| f.and(flame_core::Predicate::Group(Default::default())))
            .to_string();
        assert_eq!(sql, "SELECT \"id\"\nFROM \"t\"\nWHERE \"a\" = i:p1;");

        let sql = connection
            .select(["id"])
            .from("t")
            .where_group(|f| f)
            .to_string();
        assert_eq!(sql, "SELECT \"id\"\nFROM \"t\";");

        let sql = connection
            .update("t", [("a", 1)])
            .where_group(|f| f.and(flame_core::Predicate::Group(Default::default())).eq("b", 2))
            .to_string();
        assert_eq!(sql, "UPDATE \"t\" SET\n\"a\" = i:p1\nWHERE \"b\" = i:p2;");
    }

    #[test]
    fn mysql_grammar() {
        let connection = Connection::<MockDriver>::with_grammar(
            MockConnection::connect("mock://").unwrap(),
            Arc::new(MySqlGrammar::new()),
        );
        assert_eq!(connection.quote_id("user.name"), "`user`.`name`");
        let sql = connection
            .select(["name"])
            .from("users")
            .limit(10)
            .offset(20)
            .to_string();
        assert_eq!(sql, "SELECT `name`\nFROM `users`\nLIMIT 20, 10;");
    }

    #[test]
    fn execute_runs_through_the_connection() {
        let (mut connection, calls) = connect();
        let builder = connection
            .select(["name"])
            .from("users")
            .where_eq("id", 3)
            .where_raw("created > d:since")
            .bind("since", "2024-01-01");
        builder.execute(&mut connection).unwrap();
        assert_eq!(
            *calls.borrow(),
            [
                Call::Prepare(
                    "SELECT \"name\"\nFROM \"users\"\nWHERE \"id\" = ? AND (created > ?);".into()
                ),
                Call::ClearBindings,
                Call::Bind(1, Value::Int64(3), ParamType::Int),
                Call::Bind(
                    2,
                    Value::Varchar("2024-01-01 00:00:00".into()),
                    ParamType::DateTime
                ),
                Call::Execute,
            ]
        );
        let insert = connection.insert("users", ["name"]).values(["Ada"]);
        let result = connection.execute(insert).unwrap();
        assert_eq!(result.rows_affected, 1);
    }

    #[test]
    fn transactions_are_chained() {
        let (mut connection, calls) = connect();
        connection.begin_transaction().unwrap();
        assert!(connection.in_transaction());
        assert!(connection.begin_transaction().is_err());
        connection
            .commit()
            .unwrap()
            .begin_transaction()
            .unwrap()
            .rollback()
            .unwrap();
        assert!(!connection.in_transaction());
        assert!(connection.commit().is_err());
        assert_eq!(
            *calls.borrow(),
            [Call::Begin, Call::Commit, Call::Begin, Call::Rollback]
        );
    }
}
