use crate::budget::TEMPLATES;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::BudgetService;
use crate::horizon::Month;

use super::{parse_amount, require_args};

const USAGE: &str = "budget set <month> <category> <amount>
budget show [month]
budget copy <from-month> <to-month>
budget template <name> <month>...
budget autofill <name>
budget templates";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Edit and inspect the monthly budget",
        USAGE,
        cmd_budget,
    )
    .with_subcommands(&["set", "show", "copy", "template", "autofill", "templates"])]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    };
    match action.to_lowercase().as_str() {
        "set" => set(context, rest),
        "show" => show(context, rest),
        "copy" => copy(context, rest),
        "template" => template(context, rest),
        "autofill" => autofill(context, rest),
        "templates" => templates(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{}`",
            other
        ))),
    }
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "budget set <month> <category> <amount>")?;
    let month = context.month(args[0]);
    let amount = parse_amount(args[2])?;
    BudgetService::set_budget(
        &mut context.data,
        &context.horizon,
        &month,
        args[1].trim().into(),
        amount,
    )?;
    context.persist()?;
    io::print_success(format!(
        "{} / {} set to {}",
        month,
        args[1].trim(),
        context.money(amount)
    ));
    Ok(())
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(label) => show_month(context, &context.month(label)),
        None => {
            let mut table = Table::new(vec![TableColumn::left("Month"), TableColumn::right("Total")]);
            let mut grand_total = 0.0;
            for month in context.horizon.months() {
                let total = BudgetService::month_total(&context.data, month);
                grand_total += total;
                table.push_row(vec![month.to_string(), context.money(total)]);
            }
            output_section("Budget overview");
            io::print_info(table.render());
            io::print_info(format!("Horizon total: {}", context.money(grand_total)));
            Ok(())
        }
    }
}

fn show_month(context: &ShellContext, month: &Month) -> CommandResult {
    context.horizon.require(month).map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let budget = BudgetService::month_budget(&context.data, month);
    output_section(format!("Budget for {}", month));
    if budget.is_empty() {
        io::print_info("No budgets planned for this month.");
        return Ok(());
    }
    let mut table = Table::new(vec![TableColumn::left("Category"), TableColumn::right("Amount")]);
    for (category, amount) in &budget {
        table.push_row(vec![category.to_string(), context.money(*amount)]);
    }
    io::print_info(table.render());
    io::print_info(format!(
        "Total: {}",
        context.money(BudgetService::month_total(&context.data, month))
    ));
    Ok(())
}

fn copy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "budget copy <from-month> <to-month>")?;
    let source = context.month(args[0]);
    let target = context.month(args[1]);
    BudgetService::copy_month(&mut context.data, &context.horizon, &source, &target)?;
    context.persist()?;
    io::print_success(format!("Copied {} budgets to {}", source, target));
    Ok(())
}

fn template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "budget template <name> <month>...")?;
    let months: Vec<Month> = args[1..].iter().map(|label| context.month(label)).collect();
    let skipped: Vec<&Month> = months
        .iter()
        .filter(|month| !context.horizon.contains(month))
        .collect();
    for month in skipped {
        io::print_warning(format!("Skipping `{}`: not in the planning horizon", month));
    }
    let filled =
        BudgetService::apply_template(&mut context.data, &context.horizon, args[0], &months)?;
    context.persist()?;
    io::print_success(format!("Template `{}` applied to {} month(s)", args[0], filled));
    Ok(())
}

fn autofill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "budget autofill <name>")?;
    let filled = BudgetService::auto_fill(&mut context.data, &context.horizon, args[0])?;
    context.persist()?;
    io::print_success(format!("Template `{}` applied to {} month(s)", args[0], filled));
    Ok(())
}

fn templates(context: &ShellContext) -> CommandResult {
    output_section("Budget templates");
    let mut table = Table::new(vec![
        TableColumn::left("Template"),
        TableColumn::right("Categories"),
        TableColumn::right("Monthly total"),
    ]);
    for template in TEMPLATES.iter() {
        table.push_row(vec![
            template.name.to_string(),
            template.allocations.len().to_string(),
            context.money(template.total()),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}
