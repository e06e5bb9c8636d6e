use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    for line in entry.usage.lines() {
        io::print_info(format!("  Usage: {}", line.trim()));
    }
}

pub fn print_change_syntax() {
    io::print_info("  Changes (one argument each, months like Aug-25):");
    io::print_info("    recurring:<category>:<delta>:<start>:<end>");
    io::print_info("    event:<category>:<amount>:<month>");
    io::print_info("    pause:<category>:<start>:<end>");
    io::print_info("    double:<category>:<start>:<end>");
}
