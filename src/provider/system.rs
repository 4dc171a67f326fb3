//! The bundled system library: `System.Object` plus the well-known types
//! that invocations fall back to when a name is not found in the component.

use super::{
    CallFrame, Instance, NativeComponent, NativeComponentBuilder, NativeFn, RuntimeError,
    TypeBuilder,
};
use crate::model::{
    Dispatch, MemberDescriptor, OBJECT_TYPE, Parameter, STRING_TYPE, TypeRef, VOID_TYPE, Value,
    Visibility,
};

/// Short names resolved directly to system types.
pub const WELL_KNOWN_TYPES: &[(&str, &str)] = &[
    ("Math", "System.Math"),
    ("Console", "System.Console"),
    ("System.Console", "System.Console"),
];

pub const SYSTEM_PREFIX: &str = "System.";

const INT32: &str = "System.Int32";
const DOUBLE: &str = "System.Double";
const BOOLEAN: &str = "System.Boolean";

fn t(name: &str) -> TypeRef {
    TypeRef::new(name)
}

fn p(name: &str, ty: &str) -> Parameter {
    Parameter::new(name, t(ty))
}

/// Members every class inherits from `System.Object`.
pub fn object_members() -> Vec<MemberDescriptor> {
    vec![
        MemberDescriptor::method("GetType", vec![], t("System.Type")),
        MemberDescriptor::method("MemberwiseClone", vec![], t(OBJECT_TYPE))
            .with_visibility(Visibility::Protected),
        MemberDescriptor::method("Finalize", vec![], t(VOID_TYPE))
            .with_visibility(Visibility::Protected)
            .with_dispatch(Dispatch::Virtual),
        MemberDescriptor::method("ToString", vec![], t(STRING_TYPE))
            .with_dispatch(Dispatch::Virtual),
        MemberDescriptor::method("Equals", vec![p("obj", OBJECT_TYPE)], t(BOOLEAN))
            .with_dispatch(Dispatch::Virtual),
        MemberDescriptor::method("GetHashCode", vec![], t(INT32))
            .with_dispatch(Dispatch::Virtual),
    ]
    .into_iter()
    .map(|m| m.inherited_from(OBJECT_TYPE))
    .collect()
}

/// Body for a member inherited from a system type, if the library has one.
pub fn inherited_body(declaring: &str, signature: &str) -> Option<NativeFn> {
    if declaring != OBJECT_TYPE {
        return None;
    }
    let body: NativeFn = match signature {
        "ToString()" | "GetType()" => object_to_string,
        "GetHashCode()" => object_hash_code,
        "Equals(System.Object)" => object_equals,
        _ => return None,
    };
    Some(body)
}

fn new_object() -> Instance {
    Box::new(())
}

fn object_to_string(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::from(frame.type_name))
}

fn object_hash_code(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    // FNV-1a keeps the value stable across runs.
    let hash = frame
        .type_name
        .bytes()
        .fold(0x811c9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x01000193));
    Ok(Value::Int(hash as i32 as i64))
}

fn object_equals(_frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    // A string argument never equals a component instance.
    Ok(Value::Bool(false))
}

fn math_abs_int(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let v = frame.arg_i64(0)?;
    Ok(Value::Int(v.abs()))
}

fn math_abs_double(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Float(frame.arg_f64(0)?.abs()))
}

fn math_max_int(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Int(frame.arg_i64(0)?.max(frame.arg_i64(1)?)))
}

fn math_max_double(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Float(frame.arg_f64(0)?.max(frame.arg_f64(1)?)))
}

fn math_min_int(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Int(frame.arg_i64(0)?.min(frame.arg_i64(1)?)))
}

fn math_pow(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Float(frame.arg_f64(0)?.powf(frame.arg_f64(1)?)))
}

fn math_sqrt(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Float(frame.arg_f64(0)?.sqrt()))
}

fn math_round(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    // Banker's rounding, as the system library does.
    Ok(Value::Float(frame.arg_f64(0)?.round_ties_even()))
}

fn console_write_line_empty(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    frame.write_line("");
    Ok(Value::Null)
}

fn console_write_line(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let text = frame.arg(0)?.to_string();
    frame.write_line(&text);
    Ok(Value::Null)
}

fn console_write(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let text = frame.arg(0)?.to_string();
    frame.console.push_str(&text);
    Ok(Value::Null)
}

fn environment_variable(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let name = frame.arg(0)?.to_string();
    Ok(std::env::var(name).map(Value::Str).unwrap_or(Value::Null))
}

fn environment_new_line(_frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::from("\n"))
}

pub fn library() -> NativeComponent {
    let stat = |name: &str, params: Vec<Parameter>, ret: &str| {
        MemberDescriptor::method(name, params, t(ret)).as_static()
    };

    let object = TypeBuilder::class("System", "Object")
        .base(None)
        .constructor(new_object);
    let object = object_members()
        .into_iter()
        .fold(object, |ty, mut m| {
            m.declaring_type = crate::model::DeclaringType::Snapshot(String::new());
            ty.member(m)
        });

    let math = TypeBuilder::class("System", "Math")
        .static_class()
        .member(MemberDescriptor::field("PI", t(DOUBLE)).constant())
        .method(stat("Abs", vec![p("value", INT32)], INT32), math_abs_int)
        .method(stat("Abs", vec![p("value", DOUBLE)], DOUBLE), math_abs_double)
        .method(stat("Max", vec![p("val1", INT32), p("val2", INT32)], INT32), math_max_int)
        .method(stat("Max", vec![p("val1", DOUBLE), p("val2", DOUBLE)], DOUBLE), math_max_double)
        .method(stat("Min", vec![p("val1", INT32), p("val2", INT32)], INT32), math_min_int)
        .method(stat("Pow", vec![p("x", DOUBLE), p("y", DOUBLE)], DOUBLE), math_pow)
        .method(stat("Sqrt", vec![p("d", DOUBLE)], DOUBLE), math_sqrt)
        .method(stat("Round", vec![p("a", DOUBLE)], DOUBLE), math_round);

    let console = TypeBuilder::class("System", "Console")
        .static_class()
        .method(stat("WriteLine", vec![], VOID_TYPE), console_write_line_empty)
        .method(stat("WriteLine", vec![p("value", STRING_TYPE)], VOID_TYPE), console_write_line)
        .method(stat("WriteLine", vec![p("value", OBJECT_TYPE)], VOID_TYPE), console_write_line)
        .method(stat("WriteLine", vec![p("value", INT32)], VOID_TYPE), console_write_line)
        .method(stat("Write", vec![p("value", STRING_TYPE)], VOID_TYPE), console_write);

    let environment = TypeBuilder::class("System", "Environment")
        .static_class()
        .member(MemberDescriptor::property("NewLine", t(STRING_TYPE), true, false).as_static())
        .method(stat("get_NewLine", vec![], STRING_TYPE), environment_new_line)
        .method(
            stat("GetEnvironmentVariable", vec![p("variable", STRING_TYPE)], STRING_TYPE),
            environment_variable,
        );

    NativeComponentBuilder::new("System.Runtime")
        .version("8.0.0.0")
        .ty(object)
        .ty(math)
        .ty(console)
        .ty(environment)
        .build()
}
