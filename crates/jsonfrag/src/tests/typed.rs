use alloc::{
    string::String,
    vec::Vec,
};
use std::collections::{BTreeMap, BTreeSet};

use rstest::rstest;

use crate::{
    CollectionParser, Field, LONG, MapParser, ParseError, STRING, StructParser, long_key,
    parse_with, string_key, tests::support::parse_chunked,
};

#[derive(Default, Debug, PartialEq)]
struct Sensor {
    id: i64,
    name: String,
    scale: f64,
    active: bool,
    tags: Vec<String>,
}

static TAGS: CollectionParser = CollectionParser {
    construct: |ctx| {
        ctx.push_target(Vec::<String>::new());
        Ok(())
    },
    element: &STRING,
    insert: |ctx| {
        let tag: String = ctx.pop_target()?;
        ctx.peek_target_mut::<Vec<String>>()?.push(tag);
        Ok(())
    },
};

static SENSOR: StructParser = StructParser {
    construct: |ctx| {
        ctx.push_target(Sensor::default());
        Ok(())
    },
    fields: &[
        Field {
            name: "id",
            parser: &LONG,
            apply: |ctx| {
                let id: i64 = ctx.pop_target()?;
                ctx.peek_target_mut::<Sensor>()?.id = id;
                Ok(())
            },
        },
        Field {
            name: "name",
            parser: &STRING,
            apply: |ctx| {
                let name: String = ctx.pop_target()?;
                ctx.peek_target_mut::<Sensor>()?.name = name;
                Ok(())
            },
        },
        Field {
            name: "scale",
            parser: &crate::DOUBLE,
            apply: |ctx| {
                let scale: f64 = ctx.pop_target()?;
                ctx.peek_target_mut::<Sensor>()?.scale = scale;
                Ok(())
            },
        },
        Field {
            name: "active",
            parser: &crate::BOOLEAN,
            apply: |ctx| {
                let active: bool = ctx.pop_target()?;
                ctx.peek_target_mut::<Sensor>()?.active = active;
                Ok(())
            },
        },
        Field {
            name: "tags",
            parser: &TAGS,
            apply: |ctx| {
                let tags: Vec<String> = ctx.pop_target()?;
                ctx.peek_target_mut::<Sensor>()?.tags = tags;
                Ok(())
            },
        },
    ],
};

const SENSOR_DOC: &[u8] = br#"{
    "vendor": {"name": "acme", "ids": [1, 2, {"deep": null}]},
    "name": "probe-1",
    "scale": 0.5,
    "unused": [true, false],
    "id": 7,
    "active": true,
    "tags": ["outdoor", "ha"]
}"#;

fn expected_sensor() -> Sensor {
    Sensor {
        id: 7,
        name: "probe-1".into(),
        scale: 0.5,
        active: true,
        tags: alloc::vec!["outdoor".into(), "ha".into()],
    }
}

#[test]
fn struct_fields_fill_in_any_order() {
    let sensor: Sensor = parse_with(&SENSOR, SENSOR_DOC).unwrap();
    assert_eq!(sensor, expected_sensor());
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(16)]
fn struct_parse_is_chunk_invariant(#[case] chunk: usize) {
    let sensor: Sensor = parse_chunked(&SENSOR, SENSOR_DOC, chunk).unwrap();
    assert_eq!(sensor, expected_sensor());
}

// Unknown members are skipped but still validated.
#[test]
fn skipped_members_are_validated() {
    let bad = br#"{"vendor": "\q", "id": 7}"#;
    assert!(matches!(
        parse_with::<Sensor>(&SENSOR, bad),
        Err(ParseError::InvalidEscape(_))
    ));

    let overflow = br#"{"vendor": 9223372036854775808, "id": 7}"#;
    assert!(matches!(
        parse_with::<Sensor>(&SENSOR, overflow),
        Err(ParseError::NumberFormat(_))
    ));
}

#[test]
fn typed_field_rejects_wrong_shape() {
    assert_eq!(
        parse_with::<Sensor>(&SENSOR, br#"{"id": "seven"}"#),
        Err(ParseError::Syntax(b'"'))
    );
    assert!(matches!(
        parse_with::<Sensor>(&SENSOR, br#"{"id": 7.5}"#),
        Err(ParseError::NumberFormat(_))
    ));
}

static INT_LIST: CollectionParser = CollectionParser {
    construct: |ctx| {
        ctx.push_target(Vec::<i64>::new());
        Ok(())
    },
    element: &LONG,
    insert: |ctx| {
        let v: i64 = ctx.pop_target()?;
        ctx.peek_target_mut::<Vec<i64>>()?.push(v);
        Ok(())
    },
};

static INT_SET: CollectionParser = CollectionParser {
    construct: |ctx| {
        ctx.push_target(BTreeSet::<i64>::new());
        Ok(())
    },
    element: &LONG,
    insert: |ctx| {
        let v: i64 = ctx.pop_target()?;
        ctx.peek_target_mut::<BTreeSet<i64>>()?.insert(v);
        Ok(())
    },
};

#[test]
fn collections_preserve_their_semantics() {
    let list: Vec<i64> = parse_with(&INT_LIST, b"[3, 1, 3]").unwrap();
    assert_eq!(list, alloc::vec![3, 1, 3]);

    let set: BTreeSet<i64> = parse_with(&INT_SET, b"[3, 1, 3]").unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), alloc::vec![1, 3]);
}

#[test]
fn collection_rejects_object_form() {
    assert_eq!(
        parse_with::<Vec<i64>>(&INT_LIST, b"{}"),
        Err(ParseError::Syntax(b'{'))
    );
}

static COUNTS: MapParser = MapParser {
    construct: |ctx| {
        ctx.push_target(BTreeMap::<String, i64>::new());
        Ok(())
    },
    key: string_key,
    value: &LONG,
    insert: |ctx| {
        let value: i64 = ctx.pop_target()?;
        let key: String = ctx.pop_target()?;
        ctx.peek_target_mut::<BTreeMap<String, i64>>()?.insert(key, value);
        Ok(())
    },
};

static NAMES_BY_ID: MapParser = MapParser {
    construct: |ctx| {
        ctx.push_target(BTreeMap::<i64, String>::new());
        Ok(())
    },
    key: long_key,
    value: &STRING,
    insert: |ctx| {
        let name: String = ctx.pop_target()?;
        let id: i64 = ctx.pop_target()?;
        ctx.peek_target_mut::<BTreeMap<i64, String>>()?.insert(id, name);
        Ok(())
    },
};

#[test]
fn string_keyed_map() {
    let counts: BTreeMap<String, i64> =
        parse_with(&COUNTS, br#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["a"], 3);
    assert_eq!(counts["b"], 2);
}

#[test]
fn integer_keyed_map() {
    let names: BTreeMap<i64, String> =
        parse_with(&NAMES_BY_ID, br#"{"7": "probe", "-1": "spare"}"#).unwrap();
    assert_eq!(names[&7], "probe");
    assert_eq!(names[&-1], "spare");
}

#[test]
fn integer_key_must_be_numeric() {
    assert!(matches!(
        parse_with::<BTreeMap<i64, String>>(&NAMES_BY_ID, br#"{"seven": "probe"}"#),
        Err(ParseError::NumberFormat(_))
    ));
}

#[rstest]
#[case(1)]
#[case(4)]
fn map_parse_is_chunk_invariant(#[case] chunk: usize) {
    let counts: BTreeMap<String, i64> =
        parse_chunked(&COUNTS, br#"{"alpha": 10, "beta": -20}"#, chunk).unwrap();
    assert_eq!(counts["alpha"], 10);
    assert_eq!(counts["beta"], -20);
}
