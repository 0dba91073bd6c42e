#[cfg(test)]
mod tests {
    use flame_core::{AsValue, RowLabeled, Value, parse_timestamp, parse_timestamptz};
    use rust_decimal::{Decimal, prelude::FromPrimitive};
    use std::sync::Arc;
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::default());
        assert_ne!(Value::Float32(1.0), Value::Null);
        assert_eq!(Option::<i32>::None.as_value(), Value::Null);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(4)).unwrap(),
            Some(4)
        );
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(true));
        assert_ne!(val, Value::Varchar("true".into()));
        assert_eq!(bool::try_from_value(val).unwrap(), true);
        assert_eq!(bool::try_from_value((1 as i8).into()).unwrap(), true);
        assert_eq!(bool::try_from_value((0 as u64).into()).unwrap(), false);
        assert_eq!(bool::try_from_value(" False ".into()).unwrap(), false);
        assert!(bool::try_from_value((0.5 as f32).into()).is_err());
        assert!(bool::try_from_value("yes".into()).is_err());
    }

    #[test]
    fn value_integers() {
        let val: Value = (127 as i8).into();
        assert_eq!(val, Value::Int8(127));
        assert_eq!(i8::try_from_value(val).unwrap(), 127);
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert!(i8::try_from_value((128 as i16).into()).is_err());
        assert!(i8::try_from_value((0.1 as f64).into()).is_err());
        assert_eq!(i64::try_from_value(Value::UInt32(u32::MAX)).unwrap(), u32::MAX as i64);
        assert_eq!(i32::try_from_value(" -42 ".into()).unwrap(), -42);
        assert_eq!(
            i32::try_from_value(Decimal::from_i32(12).unwrap().into()).unwrap(),
            12
        );
        assert!(i32::try_from_value(Decimal::from_f64(1.5).unwrap().into()).is_err());
        assert!(u64::try_from_value((-1 as i64).into()).is_err());
        assert_eq!(u16::try_from_value((65535 as u64).into()).unwrap(), 65535);
        assert!(u16::try_from_value((65536 as u64).into()).is_err());
    }

    #[test]
    fn value_floats() {
        let val: Value = 1.5f64.into();
        assert_eq!(val, Value::Float64(1.5));
        assert_eq!(f64::try_from_value((3 as i16).into()).unwrap(), 3.0);
        assert_eq!(f32::try_from_value("0.25".into()).unwrap(), 0.25);
        assert_eq!(
            f64::try_from_value(Decimal::from_f64(2.5).unwrap().into()).unwrap(),
            2.5
        );
        assert!(f64::try_from_value(Value::Boolean(true)).is_err());
    }

    #[test]
    fn value_decimal() {
        let var = Decimal::from_f64(3.75).unwrap();
        let val: Value = var.into();
        assert_eq!(val, Value::Decimal(var));
        assert_eq!(Decimal::try_from_value(val).unwrap(), var);
        assert_eq!(Decimal::try_from_value("3.75".into()).unwrap(), var);
        assert_eq!(
            Decimal::try_from_value((7 as u8).into()).unwrap(),
            Decimal::from_u8(7).unwrap()
        );
    }

    #[test]
    fn value_string() {
        let val: Value = "Hello World!".into();
        assert_eq!(val, Value::Varchar("Hello World!".into()));
        assert_eq!(String::try_from_value(val).unwrap(), "Hello World!");
        assert_eq!(String::try_from_value((5 as i32).into()).unwrap(), "5");
        assert_eq!(
            String::try_from_value(Value::Blob(b"abc".to_vec().into())).unwrap(),
            "abc"
        );
        assert!(String::try_from_value(Value::Blob([0xff, 0xfe].into())).is_err());
        assert!(String::try_from_value(Value::Null).is_err());
    }

    #[test]
    fn value_blob() {
        let val: Value = vec![1u8, 2, 3].into();
        assert_eq!(val, Value::Blob([1, 2, 3].into()));
        assert_eq!(Vec::<u8>::try_from_value(val).unwrap(), [1, 2, 3]);
        assert_eq!(*Box::<[u8]>::try_from_value("ab".into()).unwrap(), *b"ab");
        assert!(Vec::<u8>::try_from_value((1 as i32).into()).is_err());
    }

    #[test]
    fn value_uuid() {
        let var = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let val: Value = var.into();
        assert_eq!(val, Value::Uuid(var));
        assert_eq!(
            Uuid::try_from_value("67e55044-10b1-426f-9247-bb680e5fe0c8".into()).unwrap(),
            var
        );
        assert_eq!(
            Uuid::try_from_value(Value::Blob(var.as_bytes().to_vec().into())).unwrap(),
            var
        );
        assert_eq!(val.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn value_date() {
        let var = Date::from_calendar_date(2025, Month::January, 22).unwrap();
        let val: Value = var.into();
        assert_eq!(val, Value::Date(var));
        assert_eq!(Date::try_from_value("2025-01-22".into()).unwrap(), var);
        assert!(Date::try_from_value("22/01/2025".into()).is_err());
    }

    #[test]
    fn value_time() {
        let var = Time::from_hms(13, 22, 0).unwrap();
        assert_eq!(Time::try_from_value(var.into()).unwrap(), var);
        assert_eq!(Time::try_from_value("13:22".into()).unwrap(), var);
        assert_eq!(
            Time::try_from_value("13:22:00.250".into()).unwrap(),
            Time::from_hms_milli(13, 22, 0, 250).unwrap()
        );
    }

    #[test]
    fn value_datetime() {
        let var = PrimitiveDateTime::new(
            Date::from_calendar_date(2025, Month::July, 29).unwrap(),
            Time::from_hms_milli(14, 52, 36, 500).unwrap(),
        );
        let val: Value = var.into();
        assert_eq!(val, Value::Timestamp(var));
        for text in ["2025-07-29T14:52:36.500", "2025-07-29 14:52:36.5"] {
            assert_eq!(parse_timestamp(text).unwrap(), var);
        }
        assert_eq!(
            parse_timestamp("2025-07-29").unwrap(),
            var.replace_time(Time::MIDNIGHT)
        );
        assert!(parse_timestamp("tomorrow").is_err());

        let tz: OffsetDateTime = var.assume_offset(UtcOffset::from_hms(1, 0, 0).unwrap());
        assert_eq!(
            parse_timestamptz("2025-07-29 14:52:36.5+01:00").unwrap(),
            tz
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(tz.into()).unwrap(),
            var.replace_time(Time::from_hms_milli(13, 52, 36, 500).unwrap())
        );
        assert_eq!(
            OffsetDateTime::try_from_value(var.into()).unwrap(),
            var.assume_utc()
        );
    }

    #[test]
    fn row_get() {
        let row = RowLabeled::new(
            Arc::from(["id".to_string(), "name".to_string()]),
            [Value::Int64(1), Value::Varchar("Ada".into())].into(),
        );
        assert_eq!(row.get::<i32>("id").unwrap(), 1);
        assert_eq!(row.get::<String>("name").unwrap(), "Ada");
        assert_eq!(row.get_column("name"), Some(&Value::Varchar("Ada".into())));
        assert!(row.get::<i32>("name").is_err());
        assert!(row.get::<i32>("missing").is_err());
    }
}
