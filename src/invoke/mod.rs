//! Resolution of `Type.Method` requests to a concrete method.
//!
//! Types are looked up in the inspected component first, then among the
//! well-known short names, then in the bundled system library. Overloads are
//! narrowed by arity; with exactly one argument a `String` parameter beats an
//! `Object` parameter, which beats anything else. Ties between several
//! multi-argument overloads go to the first one the provider listed.

mod coerce;
mod instances;

pub use coerce::{CoercionError, coerce};
pub use instances::{InstanceCache, TypeOrigin};

use crate::inspect::{InspectError, Snapshot};
use crate::model::{
    ArgumentPreview, MemberDescriptor, OBJECT_TYPE, Parameter, STRING_TYPE, TypeDescriptor,
};
use crate::provider::RuntimeError;
use crate::provider::system::{SYSTEM_PREFIX, WELL_KNOWN_TYPES};

/// A type found for an invocation, and which runtime owns it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedType<'a> {
    pub origin: TypeOrigin,
    pub ty: &'a TypeDescriptor,
}

/// Split at the last `.`; type names may contain dots themselves.
pub fn split_method_name(full_name: &str) -> Result<(&str, &str), InspectError> {
    match full_name.rsplit_once('.') {
        Some((ty, method)) if !ty.is_empty() && !method.is_empty() => Ok((ty, method)),
        _ => Err(InspectError::InvalidMethodName(full_name.to_string())),
    }
}

pub fn resolve_type<'a>(
    type_name: &str,
    snapshot: &'a Snapshot,
    system: &'a [TypeDescriptor],
) -> Result<ResolvedType<'a>, InspectError> {
    if let Some(ty) = snapshot.find(type_name) {
        return Ok(ResolvedType {
            origin: TypeOrigin::Component,
            ty,
        });
    }

    let well_known = WELL_KNOWN_TYPES
        .iter()
        .find(|(short, _)| *short == type_name)
        .map(|(_, full)| full.to_string());
    let mut candidates: Vec<String> = well_known.into_iter().collect();
    candidates.push(type_name.to_string());
    if !type_name.starts_with(SYSTEM_PREFIX) {
        candidates.push(format!("{}{}", SYSTEM_PREFIX, type_name));
    }

    candidates
        .iter()
        .find_map(|name| find_in(system, name))
        .map(|ty| ResolvedType {
            origin: TypeOrigin::System,
            ty,
        })
        .ok_or_else(|| InspectError::TypeNotFound(type_name.to_string()))
}

fn find_in<'a>(types: &'a [TypeDescriptor], full_name: &str) -> Option<&'a TypeDescriptor> {
    types.iter().find_map(|t| {
        if t.full_name == full_name {
            Some(t)
        } else {
            find_in(&t.nested, full_name)
        }
    })
}

pub fn select_method<'a>(
    ty: &'a TypeDescriptor,
    method_name: &str,
    arg_count: usize,
) -> Result<&'a MemberDescriptor, InspectError> {
    let candidates: Vec<&MemberDescriptor> = ty.methods_named(method_name).collect();
    match candidates.as_slice() {
        [] => Err(InspectError::MethodNotFound {
            method: method_name.to_string(),
            type_name: ty.full_name.clone(),
        }),
        [only] => Ok(*only),
        _ => candidates
            .iter()
            .filter(|m| m.parameters().len() == arg_count)
            .min_by_key(|m| affinity(m, arg_count))
            .copied()
            .ok_or_else(|| InspectError::AmbiguousOrNoOverload {
                method: method_name.to_string(),
                arg_count,
            }),
    }
}

fn affinity(method: &MemberDescriptor, arg_count: usize) -> u8 {
    if arg_count != 1 {
        return 2;
    }
    match method.parameters().first() {
        Some(p) if p.parameter_type.is(STRING_TYPE) => 0,
        Some(p) if p.parameter_type.is(OBJECT_TYPE) => 1,
        _ => 2,
    }
}

/// The argument count must match before anything is constructed or called.
/// `invocation` is the qualified `Type.Method` name as requested.
pub fn check_arity(
    invocation: &str,
    method: &MemberDescriptor,
    given: usize,
) -> Result<(), InspectError> {
    let expected = method.parameters().len();
    if expected == given {
        return Ok(());
    }
    Err(InspectError::InvocationFailed {
        method: invocation.to_string(),
        source: RuntimeError::ParameterCount {
            method: method.signature(),
            expected,
            given,
        },
    })
}

pub fn parameter_name(parameter: &Parameter, index: usize) -> String {
    parameter
        .name
        .clone()
        .unwrap_or_else(|| format!("arg{}", index))
}

/// How an argument is echoed back before the call.
pub fn preview(raw: &str, parameter: &Parameter, index: usize) -> ArgumentPreview {
    let type_name = parameter.parameter_type.name();
    let display = match type_name.as_str() {
        "String" => format!("\"{}\"", raw),
        "Char" => format!("'{}'", raw),
        "Boolean" => raw.to_lowercase(),
        _ => raw.to_string(),
    };
    ArgumentPreview {
        type_name,
        parameter_name: parameter_name(parameter, index),
        display,
    }
}
