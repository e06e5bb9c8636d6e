use crate::cli::change_spec::parse_changes;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::ScenarioService;

use super::require_args;

const USAGE: &str = "scenario create <name> [--description <text>] <change>...
scenario list
scenario show <scenario>
scenario duplicate <scenario>
scenario delete <scenario>
scenario clear";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "scenario",
        "Manage what-if scenarios",
        USAGE,
        cmd_scenario,
    )
    .with_subcommands(&["create", "list", "show", "duplicate", "delete", "clear"])]
}

fn cmd_scenario(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    };
    match action.to_lowercase().as_str() {
        "create" => create(context, rest),
        "list" => list(context),
        "show" => show(context, rest),
        "duplicate" => duplicate(context, rest),
        "delete" => delete(context, rest),
        "clear" => clear(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown scenario action `{}`",
            other
        ))),
    }
}

fn create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(
        args,
        1,
        "scenario create <name> [--description <text>] <change>...",
    )?;
    let name = args[0];
    let mut description = String::new();
    let mut specs = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        if matches!(*arg, "--description" | "-d") {
            let text = rest.next().ok_or_else(|| {
                CommandError::InvalidArguments("--description needs a value".into())
            })?;
            description = text.to_string();
        } else {
            specs.push(*arg);
        }
    }
    let changes = parse_changes(&specs, &context.horizon)?;
    let id = ScenarioService::create(
        &mut context.data,
        &context.horizon,
        name,
        &description,
        changes,
    )?;
    context.persist()?;
    io::print_success(format!("Scenario `{}` created ({})", name.trim(), short_id(&id.to_string())));
    Ok(())
}

fn list(context: &ShellContext) -> CommandResult {
    let scenarios = ScenarioService::list(&context.data);
    if scenarios.is_empty() {
        io::print_info("No scenarios saved. Use `scenario create` to add one.");
        return Ok(());
    }
    output_section("Scenarios");
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Name"),
        TableColumn::right("Changes"),
        TableColumn::left("Created"),
    ]);
    for scenario in scenarios {
        table.push_row(vec![
            short_id(&scenario.id.to_string()),
            scenario.name.clone(),
            scenario.changes.len().to_string(),
            scenario.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}

fn show(context: &ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "scenario show <scenario>")?;
    let scenario = context.find_scenario(args[0])?;
    output_section(format!("Scenario: {}", scenario.name));
    io::print_info(format!("  Id          : {}", scenario.id));
    if !scenario.description.is_empty() {
        io::print_info(format!("  Description : {}", scenario.description));
    }
    io::print_info(format!(
        "  Created     : {}",
        scenario.created_at.format("%Y-%m-%d %H:%M")
    ));
    io::print_info(format!("  Changes     : {}", scenario.summary()));
    for (idx, change) in scenario.changes.iter().enumerate() {
        io::print_info(format!("    {}. {}", idx + 1, change.summary()));
    }
    Ok(())
}

fn duplicate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "scenario duplicate <scenario>")?;
    let source = context.find_scenario(args[0])?;
    let copy_id = ScenarioService::duplicate(&mut context.data, source.id)?;
    context.persist()?;
    let copy = ScenarioService::get(&context.data, copy_id)?;
    io::print_success(format!(
        "Scenario `{}` duplicated as `{}` ({})",
        source.name,
        copy.name,
        short_id(&copy_id.to_string())
    ));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "scenario delete <scenario>")?;
    let scenario = context.find_scenario(args[0])?;
    if !context.confirm(&format!("Delete scenario `{}`?", scenario.name))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    ScenarioService::delete(&mut context.data, scenario.id)?;
    context.persist()?;
    io::print_success(format!("Scenario `{}` deleted", scenario.name));
    Ok(())
}

fn clear(context: &mut ShellContext) -> CommandResult {
    if !context.confirm("Delete all scenarios?")? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    let count = ScenarioService::clear(&mut context.data);
    context.persist()?;
    io::print_success(format!("{} scenario(s) removed", count));
    Ok(())
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
