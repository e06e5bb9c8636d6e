use std::path::PathBuf;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::BudgetService;
use crate::simulation::{ImpactDirection, SimulationResult};

use super::require_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "simulate",
            "Project a scenario onto the budget without changing it",
            "simulate <scenario>",
            cmd_simulate,
        ),
        CommandEntry::new(
            "compare",
            "Simulate several scenarios side by side",
            "compare <scenario> <scenario>...",
            cmd_compare,
        ),
        CommandEntry::new(
            "export",
            "Write a scenario's simulation result to a JSON file",
            "export <scenario> <file.json>",
            cmd_export,
        ),
        CommandEntry::new(
            "apply",
            "Replace the budget with a scenario's simulated budget",
            "apply <scenario>",
            cmd_apply,
        ),
    ]
}

fn cmd_simulate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "simulate <scenario>")?;
    let scenario = context.find_scenario(args[0])?;
    let result = context.simulator().simulate(scenario.id)?;
    print_result(context, &result);
    context.last_result = Some(result);
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ids = args
        .iter()
        .map(|key| context.find_scenario(key).map(|scenario| scenario.id))
        .collect::<Result<Vec<_>, _>>()?;
    let comparison = context.simulator().compare(&ids)?;

    output_section("Scenario comparison");
    let mut table = Table::new(vec![
        TableColumn::left("Scenario"),
        TableColumn::right("Total impact"),
        TableColumn::left("Risk"),
    ]);
    for entry in &comparison.entries {
        table.push_row(vec![
            entry.name.clone(),
            context.money(entry.total_impact),
            entry.risk_level.to_string(),
        ]);
    }
    io::print_info(table.render());
    if let Some(best) = comparison.recommended_entry() {
        io::print_success(format!(
            "Recommended: {} ({})",
            best.name,
            context.money(best.total_impact)
        ));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "export <scenario> <file.json>")?;
    let scenario = context.find_scenario(args[0])?;
    let result = match context.last_result.take() {
        Some(previous) if previous.scenario == scenario => previous,
        _ => context.simulator().simulate(scenario.id)?,
    };
    let path = PathBuf::from(args[1]);
    let outcome = context.storage.export_result(&result, &path);
    context.last_result = Some(result);
    outcome?;
    io::print_success(format!("Simulation exported to {}", path.display()));
    Ok(())
}

fn cmd_apply(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "apply <scenario>")?;
    let scenario = context.find_scenario(args[0])?;
    let prompt = format!(
        "Replace the current budget with the outcome of `{}`?",
        scenario.name
    );
    if !context.confirm(&prompt)? {
        io::print_info("Budget left unchanged.");
        return Ok(());
    }
    let result = BudgetService::apply_scenario(
        &mut context.data,
        &context.horizon,
        context.classifier,
        scenario.id,
    )?;
    context.persist()?;
    io::print_success(format!(
        "Scenario `{}` applied; net change {}",
        scenario.name,
        context.money(result.impact.total_impact)
    ));
    Ok(())
}

fn print_result(context: &ShellContext, result: &SimulationResult) {
    let impact = &result.impact;
    output_section(format!("Simulation: {}", result.scenario.name));

    if impact.is_noop() {
        io::print_info("This scenario does not change the budget.");
    }
    let direction = match impact.impact_type {
        ImpactDirection::Increase => "increase",
        ImpactDirection::Decrease => "decrease",
        ImpactDirection::Neutral => "neutral",
    };
    io::print_info(format!(
        "Net impact: {} ({})",
        context.money(impact.total_impact),
        direction
    ));
    io::print_info(format!("Affected months: {}", impact.affected_months));
    io::print_info(format!("Risk level: {}", impact.risk_level));
    io::print_info(format!("Recommendation: {}", impact.recommendation));

    if !impact.monthly_changes.is_empty() {
        output_section("Monthly changes");
        let mut table = Table::new(vec![
            TableColumn::left("Month"),
            TableColumn::right("Original"),
            TableColumn::right("Simulated"),
            TableColumn::right("Change"),
            TableColumn::right("Change %"),
        ]);
        for change in &impact.monthly_changes {
            table.push_row(vec![
                change.month.to_string(),
                context.money(change.original_total),
                context.money(change.simulated_total),
                context.money(change.change),
                format!("{:.1}%", change.change_percent),
            ]);
        }
        io::print_info(table.render());
    }

    if !impact.category_impact.is_empty() {
        output_section("Category impact");
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Original"),
            TableColumn::right("Simulated"),
            TableColumn::right("Change"),
        ]);
        for (category, change) in &impact.category_impact {
            table.push_row(vec![
                category.to_string(),
                context.money(change.original_total),
                context.money(change.simulated_total),
                context.money(change.change),
            ]);
        }
        io::print_info(table.render());
    }

    for negative in &result.negative_budgets {
        io::print_warning(format!(
            "{} in {} would drop to {}",
            negative.category,
            negative.month,
            context.money(negative.amount)
        ));
    }

    let advice = &result.advice;
    if !advice.advantages.is_empty() {
        output_section("Advantages");
        advice.advantages.iter().for_each(|line| io::print_info(format!("  + {}", line)));
    }
    if !advice.disadvantages.is_empty() {
        output_section("Disadvantages");
        advice.disadvantages.iter().for_each(|line| io::print_info(format!("  - {}", line)));
    }
    output_section("Action items");
    for (idx, action) in advice.actions.iter().enumerate() {
        io::print_info(format!("  {}. {}", idx + 1, action));
    }
}
