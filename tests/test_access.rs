extern crate just_bridge;


use host_fixtures::{context_with, counter, point, registry, setup, Counter, Faulty, Point, Registry};
use just_bridge::bridge::{AccessKind, BridgeConfig, WrappedError};
use just_bridge::engine::operations::{call_function, get_value, has_property, put_value};
use just_bridge::engine::{PropertyKey, ScriptError, ScriptValue};
use just_bridge::host::HostValue;

fn attribute_context() -> just_bridge::bridge::Context {
    context_with(BridgeConfig::new().with_access(AccessKind::Attribute))
}

fn is_function(value: &ScriptValue) -> bool {
    value.as_object().map_or(false, |o| o.is_callable())
}

#[test]
fn test_default_reads_zero_arity_members_as_properties() {
    let (ctx, scope) = setup();
    let c = ctx.wrap(counter(), Some(&scope)).unwrap();
    assert_eq!(get_value(&c, &"count".into()).unwrap(), ScriptValue::from(0i64));
    assert!(is_function(&get_value(&c, &"increment".into()).unwrap()));
}

#[test]
fn test_attribute_reads_only_attributes_as_properties() {
    let ctx = attribute_context();
    let c = ctx.wrap(counter(), None).unwrap();
    // `count` has neither a writer nor a backing field.
    let count = get_value(&c, &"count".into()).unwrap();
    assert!(is_function(&count));
    let result = call_function(&count, Some(&ctx), None, &c, vec![]).unwrap();
    assert_eq!(result, ScriptValue::from(0i64));

    let p = ctx.wrap(point(5, 6), None).unwrap();
    assert_eq!(get_value(&p, &"x".into()).unwrap(), ScriptValue::from(5i64));
    assert!(is_function(&get_value(&p, &"norm2".into()).unwrap()));
}

#[test]
fn test_writes_go_to_the_writer() {
    let (ctx, scope) = setup();
    let original = point(0, 0);
    let p = ctx.wrap(original.clone(), Some(&scope)).unwrap();
    put_value(&p, "x".into(), ScriptValue::from(11i64)).unwrap();
    assert_eq!(original.downcast_ref::<Point>().unwrap().x.get(), 11);
    assert_eq!(get_value(&p, &"x".into()).unwrap(), ScriptValue::from(11i64));
    assert!(p.as_object().unwrap().get_ids().iter().all(|id| id.as_str() != Some("x=")));
}

#[test]
fn test_attribute_writes_go_to_the_writer_too() {
    let ctx = attribute_context();
    let original = point(0, 0);
    let p = ctx.wrap(original.clone(), None).unwrap();
    put_value(&p, "y".into(), ScriptValue::from(3i64)).unwrap();
    assert_eq!(original.downcast_ref::<Point>().unwrap().y.get(), 3);
}

#[test]
fn test_write_only_member_reads_as_null() {
    let (ctx, scope) = setup();
    let c = ctx.wrap(counter(), Some(&scope)).unwrap();
    assert_eq!(get_value(&c, &"secret".into()).unwrap(), ScriptValue::Null);
    assert!(has_property(&c, &"secret".into()).unwrap());
    put_value(&c, "secret".into(), ScriptValue::from("hunter2")).unwrap();
    // The writer consumed the value; nothing was stored on the wrapper.
    assert_eq!(c.as_object().unwrap().get_ids().len(), 3);
}

#[test]
fn test_unknown_writes_fall_back_to_the_wrapper() {
    let (ctx, scope) = setup();
    let original = counter();
    let c = ctx.wrap(original.clone(), Some(&scope)).unwrap();
    put_value(&c, "count".into(), ScriptValue::from(40i64)).unwrap();
    // No `count=` writer, so the value lands on the wrapper, but the host reader still wins.
    assert_eq!(original.downcast_ref::<Counter>().unwrap().count.get(), 0);
    assert_eq!(get_value(&c, &"count".into()).unwrap(), ScriptValue::from(0i64));
    assert_eq!(c.as_object().unwrap().get_ids()[0], PropertyKey::from("count"));
}

#[test]
fn test_has_sees_readers_and_writers() {
    let (ctx, scope) = setup();
    let p = ctx.wrap(point(0, 0), Some(&scope)).unwrap();
    assert!(has_property(&p, &"x".into()).unwrap());
    assert!(has_property(&p, &"move_by".into()).unwrap());
    assert!(!has_property(&p, &"z".into()).unwrap());
}

#[test]
fn test_index_access_reaches_host() {
    let (ctx, scope) = setup();
    let original = registry();
    let r = ctx.wrap(original.clone(), Some(&scope)).unwrap();
    put_value(&r, "alpha".into(), ScriptValue::from(1i64)).unwrap();
    put_value(&r, PropertyKey::Int(2), ScriptValue::from("two")).unwrap();
    let store = original.downcast_ref::<Registry>().unwrap();
    assert_eq!(store.entries.borrow().get("alpha"), Some(&HostValue::Int(1)));
    assert_eq!(store.entries.borrow().get("2"), Some(&HostValue::from("two")));

    assert_eq!(get_value(&r, &"alpha".into()).unwrap(), ScriptValue::from(1i64));
    assert_eq!(get_value(&r, &PropertyKey::Int(2)).unwrap(), ScriptValue::from("two"));
    assert!(has_property(&r, &"alpha".into()).unwrap());
    assert!(!has_property(&r, &"beta".into()).unwrap());
    assert_eq!(get_value(&r, &"size".into()).unwrap(), ScriptValue::from(2i64));
}

#[test]
fn test_index_miss_falls_back() {
    let (ctx, scope) = setup();
    scope.object_prototype().define("inherited", ScriptValue::from(true));
    let r = ctx.wrap(registry(), Some(&scope)).unwrap();
    assert_eq!(get_value(&r, &"inherited".into()).unwrap(), ScriptValue::from(true));
    assert_eq!(get_value(&r, &"missing".into()).unwrap(), ScriptValue::Undefined);
}

#[test]
fn test_internal_names_never_reach_host() {
    let (ctx, scope) = setup();
    let original = registry();
    let r = ctx.wrap(original.clone(), Some(&scope)).unwrap();
    put_value(&r, "__proto_tag__".into(), ScriptValue::from("kept")).unwrap();
    assert!(original.downcast_ref::<Registry>().unwrap().entries.borrow().is_empty());
    assert_eq!(get_value(&r, &"__proto_tag__".into()).unwrap(), ScriptValue::from("kept"));
}

#[test]
fn test_failing_reader_surfaces_wrapped_error() {
    let (ctx, scope) = setup();
    let f = ctx.wrap(HostValue::object(Faulty), Some(&scope)).unwrap();
    match get_value(&f, &"status".into()) {
        Err(ScriptError::Thrown(value)) => {
            let original = WrappedError::from_value(&value).unwrap();
            assert_eq!(original.message(), "status unavailable");
        }
        other => panic!("expected a thrown host error, got {:?}", other),
    }
}
