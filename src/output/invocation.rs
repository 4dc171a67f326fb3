use crate::model::{CallResult, InstanceUse, InvocationResult};
use std::time::Duration;

pub const NEW_HINT: &str = "[green]new[/] ";
pub const CACHED_HINT: &str = "[dim](cached)[/] ";
pub const NO_RESULT: &str = "[dim]<no result>[/]";

/// The `Invoking:` line, the call's console output, then the `Result:` line.
pub fn invocation(result: &InvocationResult) -> String {
    let (prefix, suffix) = match result.instance {
        InstanceUse::Static => ("", ""),
        InstanceUse::Fresh => (NEW_HINT, "()"),
        InstanceUse::Reused => (CACHED_HINT, ""),
    };
    let arguments: Vec<String> = result
        .arguments
        .iter()
        .map(|a| format!("[verbose]{} {}: [/]{}", a.type_name, a.parameter_name, a.display))
        .collect();

    let mut out = format!(
        "[br][dim]>>[/] [teal]Invoking:[/] {}[purple]{}[/]{}.[sky]{}[/]({})[br]",
        prefix,
        result.type_name,
        suffix,
        result.method_name,
        arguments.join(", ")
    );
    out.push_str(&result.console);
    let value = match &result.result {
        CallResult::Returned(value) => value.to_string(),
        CallResult::NoResult => NO_RESULT.to_string(),
    };
    out.push_str(&format!("[dim]>>[/] [sky]Result:[/] {}[br]", value));
    out
}

pub fn loading(component: &str) -> String {
    format!("[info]Loading component: {}[/]", component)
}

pub fn loaded(display_name: &str) -> String {
    format!("[success]Successfully loaded component: {}[/]", display_name)
}

pub fn found_types(count: usize) -> String {
    format!("[yellow]Found {} type(s) in the component[/][br]", count)
}

pub fn completed(elapsed: Duration) -> String {
    format!("[br][info]Component inspection completed in {:.2?}[/]", elapsed)
}
