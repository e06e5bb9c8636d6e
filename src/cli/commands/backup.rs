use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

use super::require_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backup",
            "Snapshot budgets and scenarios",
            "backup [note]",
            cmd_backup,
        ),
        CommandEntry::new("backups", "List available backups", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Restore budgets and scenarios from a backup",
            "restore <backup-name | number>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let name = context.storage.backup(&context.data, note.as_deref())?;
    io::print_success(format!("Backup written: {}", name));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.storage.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet. Use `backup [note]` to create one.");
        return Ok(());
    }
    output_section("Backups (newest first)");
    for (idx, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", idx + 1, name));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "restore <backup-name | number>")?;
    let name = match args[0].parse::<usize>() {
        Ok(position) if position > 0 => context
            .storage
            .list_backups()?
            .into_iter()
            .nth(position - 1)
            .unwrap_or_else(|| args[0].to_string()),
        _ => args[0].to_string(),
    };
    if !context.confirm(&format!("Replace current data with `{}`?", name))? {
        io::print_info("Nothing restored.");
        return Ok(());
    }
    context.data = context.storage.restore(&name)?;
    context.last_result = None;
    io::print_success(format!(
        "Restored `{}` ({} scenario(s))",
        name,
        context.data.scenarios.len()
    ));
    Ok(())
}
