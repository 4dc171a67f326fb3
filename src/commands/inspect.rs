use crate::cli::Cli;
use crate::config::InspectionRequest;
use crate::fs::default_fs;
use crate::inspect::Session;
use crate::model::MemberCategory;
use crate::output;
use crate::provider::ComponentLoader;
use crate::style::Renderer;
use std::time::Instant;

use super::{CommandContext, report_error};

pub fn cmd_inspect(cli: Cli) -> i32 {
    let started = Instant::now();
    let ctx = match CommandContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let out = &ctx.renderer;
    let request = &ctx.request;

    out.print(&arguments_summary(request));

    let code = run(request, out);
    out.print(&output::completed(started.elapsed()));
    out.print("[br]");
    code
}

fn run(request: &InspectionRequest, out: &Renderer) -> i32 {
    out.print(&output::loading(&request.component.display().to_string()));
    let component = match ComponentLoader::new().load(&request.component, default_fs()) {
        Ok(component) => component,
        Err(e) => {
            report_error(out, &e);
            return 1;
        }
    };
    out.print(&output::loaded(&component.display_name()));

    let mut session = Session::new();
    match session.inspect(component) {
        Ok(snapshot) => out.print(&output::found_types(snapshot.len())),
        Err(e) => {
            report_error(out, &e);
            return 1;
        }
    }

    let mut failed = false;
    let listing = request.listing_options();
    let mut sections = Vec::new();
    if request.is_full_dump() {
        sections.push(session.dump(&request.dump_options()));
    } else {
        if request.list_types {
            sections.push(session.list_types(&listing));
        }
        let kinds = [
            (request.list_fields, MemberCategory::Field),
            (request.list_properties, MemberCategory::Property),
            (request.list_methods, MemberCategory::Method),
        ];
        for (wanted, category) in kinds {
            if wanted {
                sections.push(session.list_members(category, &listing));
            }
        }
    }
    for section in sections {
        match section {
            Ok(markup) => out.print(&markup),
            Err(e) => {
                report_error(out, &e);
                failed = true;
            }
        }
    }

    for invocation in &request.invocations {
        out.verbose(&format!("Invoking {} with {:?}[br]", invocation.method, invocation.arguments));
        match session.invoke(invocation) {
            Ok(result) => out.print(&output::invocation(&result)),
            Err(e) => {
                report_error(out, &e);
                failed = true;
            }
        }
    }

    if failed { 1 } else { 0 }
}

fn arguments_summary(request: &InspectionRequest) -> String {
    let args: Vec<String> = std::env::args().skip(1).collect();
    format!(
        "[br][verbose]Command Line Arguments:[br]\
         [tab]* Raw Args: \"{}\"[br]\
         [tab]* Component: \"{}\"[br]\
         [tab]* Verbose: {}[br]\
         [tab]* Show Types: {}[br]\
         [tab]* Show Fields: {}[br]\
         [tab]* Show Properties: {}[br]\
         [tab]* Show Methods: {}[br]\
         [tab]* Invocations: {}[br]\
         [tab]* Declared Only: {}[br][br][/]",
        args.join(" "),
        request.component.display(),
        request.verbose,
        request.list_types,
        request.list_fields,
        request.list_properties,
        request.list_methods,
        request.invocations.len(),
        request.discovery == output::Discovery::DeclaredOnly,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn request(args: &[&str]) -> InspectionRequest {
        let mut argv = vec!["component-inspector"];
        argv.extend_from_slice(args);
        InspectionRequest::from_cli(&Cli::from_args(argv).unwrap(), &Config::default())
    }

    #[test]
    fn test_successful_run_exits_zero() {
        let request = request(&["-a", "-i", "ExampleLibrary.Device.TurnOn"]);
        assert_eq!(run(&request, &Renderer::default()), 0);
    }

    #[test]
    fn test_failed_invocation_does_not_stop_later_ones() {
        let request = request(&[
            "-i",
            "ExampleLibrary.Device.Missing",
            "-i",
            "Math.Abs",
            "-5",
        ]);
        assert_eq!(request.invocations.len(), 2);
        assert_eq!(run(&request, &Renderer::default()), 1);
    }

    #[test]
    fn test_missing_component_exits_one() {
        let request = request(&["/nonexistent/shapes.json"]);
        assert_eq!(run(&request, &Renderer::default()), 1);
    }

    #[test]
    fn test_arguments_summary_is_verbose_only() {
        let summary = arguments_summary(&request(&["-t"]));
        assert!(summary.starts_with("[br][verbose]"));
        assert!(Renderer::new(false, false, 4).render(&summary).trim().is_empty());
        assert!(summary.contains("[tab]* Show Types: true[br]"));
    }
}
