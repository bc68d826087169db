extern crate just_bridge;


use host_fixtures::{new_context, point, recording_fn, setup, Point};
use just_bridge::bridge::{Bridge, FunctionWrapper, ObjectWrapper, WrappedError};
use just_bridge::engine::operations::{call_function, call_method, get_value, has_property, loose_equals};
use just_bridge::engine::{ScriptError, ScriptObjectRef, ScriptValue};
use just_bridge::host::{Arity, HostCallable, HostFn, HostValue};
use std::rc::Rc;

fn numbers(n: i64) -> Vec<ScriptValue> {
    (1..=n).map(ScriptValue::from).collect()
}

fn script_fn(callable: HostCallable) -> ScriptValue {
    let bridge = Rc::new(Bridge::default());
    ScriptValue::Object(FunctionWrapper::wrap(&bridge, None, callable, None) as ScriptObjectRef)
}

#[test]
fn test_missing_arguments_become_null() {
    let (ctx, scope) = setup();
    let (f, log) = recording_fn("pair", Arity::exactly(2));
    let f = ctx.wrap(HostValue::Callable(f), Some(&scope)).unwrap();
    let result = call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, vec![]).unwrap();
    assert_eq!(result, ScriptValue::from(2i64));
    assert_eq!(log.borrow()[0], vec![HostValue::Nil, HostValue::Nil]);
}

#[test]
fn test_extra_arguments_are_dropped() {
    let (ctx, scope) = setup();
    let (f, log) = recording_fn("single", Arity::exactly(1));
    let f = ctx.wrap(HostValue::Callable(f), Some(&scope)).unwrap();
    call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, numbers(3)).unwrap();
    assert_eq!(log.borrow()[0], vec![HostValue::Int(1)]);
}

#[test]
fn test_open_arity_passes_everything() {
    let (ctx, scope) = setup();
    let (f, log) = recording_fn("all", Arity::from_raw(-1));
    let f = ctx.wrap(HostValue::Callable(f), Some(&scope)).unwrap();
    call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, numbers(5)).unwrap();
    let expected: Vec<HostValue> = (1..=5).map(HostValue::Int).collect();
    assert_eq!(log.borrow()[0], expected);
}

#[test]
fn test_variadic_pads_only_required() {
    let (ctx, scope) = setup();
    let (f, log) = recording_fn("some", Arity::from_raw(-3));
    let f = ctx.wrap(HostValue::Callable(f), Some(&scope)).unwrap();
    call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, numbers(1)).unwrap();
    call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, numbers(4)).unwrap();
    let log = log.borrow();
    assert_eq!(log[0], vec![HostValue::Int(1), HostValue::Nil]);
    assert_eq!(log[1].len(), 4);
}

#[test]
fn test_unbound_method_binds_to_this() {
    let (ctx, scope) = setup();
    let p = point(1, 1);
    let wrapped = ctx.wrap(p.clone(), Some(&scope)).unwrap();
    call_method(&wrapped, "move_by", Some(&ctx), Some(&scope), numbers(2)).unwrap();
    let moved = p.downcast_ref::<Point>().unwrap();
    assert_eq!((moved.x.get(), moved.y.get()), (2, 3));
}

#[test]
fn test_unbound_method_with_foreign_this_is_catchable() {
    let (ctx, scope) = setup();
    let wrapped = ctx.wrap(point(0, 0), Some(&scope)).unwrap();
    let move_by = get_value(&wrapped, &"move_by".into()).unwrap();
    let result = call_function(&move_by, Some(&ctx), Some(&scope), &ScriptValue::from(7i64), numbers(2));
    match result {
        Err(ScriptError::Thrown(value)) => {
            let original = WrappedError::from_value(&value).unwrap();
            assert_eq!(original.class(), "TypeError");
        }
        other => panic!("expected a thrown host error, got {:?}", other),
    }
}

#[test]
fn test_bound_method_ignores_this() {
    let (ctx, scope) = setup();
    let p = point(4, 0);
    let bound = p.method("x").unwrap();
    let f = ctx.wrap(HostValue::Callable(HostCallable::Bound(bound)), Some(&scope)).unwrap();
    let result = call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Null, vec![]).unwrap();
    assert_eq!(result, ScriptValue::from(4i64));
}

#[test]
fn test_host_results_come_back_wrapped() {
    let (ctx, scope) = setup();
    let origin = point(0, 0);
    let source = origin.clone();
    let f = HostFn::named("origin", Arity::exactly(0), move |_| Ok(source.clone()));
    let f = ctx.wrap(HostValue::Callable(HostCallable::Free(f)), Some(&scope)).unwrap();
    let a = call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, vec![]).unwrap();
    let b = call_function(&f, Some(&ctx), Some(&scope), &ScriptValue::Undefined, vec![]).unwrap();
    assert!(a.as_object().unwrap().as_any().downcast_ref::<ObjectWrapper>().is_some());
    assert_eq!(a, b);
    assert_eq!(a, ctx.wrap(origin, None).unwrap());
}

#[test]
fn test_length_and_name() {
    let (f, _) = recording_fn("some", Arity::from_raw(-3));
    let f = script_fn(f);
    assert_eq!(get_value(&f, &"length".into()).unwrap(), ScriptValue::from(2i64));
    assert_eq!(get_value(&f, &"name".into()).unwrap(), ScriptValue::from("some"));

    let bridge = Rc::new(Bridge::default());
    let anonymous = HostCallable::Free(HostFn::new(Arity::exactly(3), |_| Ok(HostValue::Nil)));
    let wrapper = FunctionWrapper::wrap(&bridge, None, anonymous, None);
    assert_eq!(wrapper.function_name(), "");
    assert_eq!(wrapper.length(), 3);
}

#[test]
fn test_anonymous_name_reads_as_empty() {
    let (ctx, scope) = setup();
    let anonymous = HostCallable::Free(HostFn::new(Arity::exactly(0), |_| Ok(HostValue::Nil)));
    let f = ctx.wrap(HostValue::Callable(anonymous), Some(&scope)).unwrap();
    assert_eq!(get_value(&f, &"name".into()).unwrap(), ScriptValue::from(""));
    assert!(has_property(&f, &"name".into()).unwrap());
    assert!(f.as_object().unwrap().get_ids().iter().all(|id| id.as_str() != Some("name")));
}

#[test]
fn test_same_reference_is_equal() {
    let (f, _) = recording_fn("tick", Arity::exactly(0));
    assert!(loose_equals(&script_fn(f.clone()), &script_fn(f)));
}

#[test]
fn test_bound_method_extracted_twice_is_equal() {
    let p = point(1, 2);
    let first = HostCallable::Bound(p.method("x").unwrap());
    let second = HostCallable::Bound(p.method("x").unwrap());
    assert!(!first.ptr_eq(&second));
    assert!(loose_equals(&script_fn(first), &script_fn(second)));
}

#[test]
fn test_different_functions_are_not_equal() {
    let (a, _) = recording_fn("tick", Arity::exactly(0));
    let (b, _) = recording_fn("tock", Arity::exactly(0));
    let a = script_fn(a);
    assert!(!loose_equals(&a, &script_fn(b)));
    assert!(!loose_equals(&a, &ScriptValue::from("tick")));
}

#[test]
fn test_rendering_and_type() {
    let (f, _) = recording_fn("tick", Arity::exactly(0));
    let f = script_fn(f);
    assert_eq!(f.to_string(), "function tick() { [native code] }");
    assert_eq!(f.type_of(), "function");
    assert_eq!(f.as_object().unwrap().class_name(), "Function");
}

#[test]
fn test_call_without_context_still_works() {
    let (f, log) = recording_fn("pair", Arity::exactly(2));
    let f = script_fn(f);
    call_function(&f, None, None, &ScriptValue::Undefined, numbers(2)).unwrap();
    assert_eq!(log.borrow()[0], vec![HostValue::Int(1), HostValue::Int(2)]);
}

#[test]
fn test_function_members_read_through_host() {
    let ctx = new_context();
    let (f, _) = recording_fn("pair", Arity::exactly(2));
    let f = ctx.wrap(HostValue::Callable(f), None).unwrap();
    assert_eq!(get_value(&f, &"arity".into()).unwrap(), ScriptValue::from(2i64));
    let call = get_value(&f, &"call".into()).unwrap();
    assert!(call.as_object().unwrap().is_callable());
}
