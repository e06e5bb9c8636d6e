use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::storage::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "months",
            "List the planning horizon with monthly totals",
            "months",
            cmd_months,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => {
                help::print_command(entry);
                if matches!(entry.name, "scenario") {
                    help::print_change_syntax();
                }
            }
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Budget Planner {}", meta.version));
    io::print_info(format!("  Data schema  : v{}", CURRENT_SCHEMA_VERSION));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    io::print_info(format!(
        "  Data file    : {}",
        context.storage.data_path().display()
    ));
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Planning horizon ({} months)", context.horizon.len()));
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Month"),
        TableColumn::right("Categories"),
        TableColumn::right("Total"),
    ]);
    for (idx, month) in context.horizon.months().iter().enumerate() {
        let categories = context.data.budgets.month(month).map_or(0, |b| b.len());
        table.push_row(vec![
            (idx + 1).to_string(),
            month.to_string(),
            categories.to_string(),
            context.money(context.data.budgets.month_total(month)),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
