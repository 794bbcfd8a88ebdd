use crate::errors::CliError;
use crate::GlobalOpts;
use colored::Colorize;
use pbridge_config::Config;

pub fn list_tools(opts: &GlobalOpts, config: &Config) -> Result<(), CliError> {
    let catalog = opts.load_catalog(config)?;

    if catalog.is_empty() {
        println!("No tools found in the configured catalogs.\n");
        println!(
            "To add a catalog, run:\n  {} config set catalogs <path>",
            "pbridge".bold().cyan()
        );
        return Ok(());
    }

    println!("{}", "Tools:".bold().green());
    for tool in catalog.tools() {
        let mut line = format!("  {}", tool.name.bold());
        if !tool.title.is_empty() && tool.title != tool.name {
            line.push_str(&format!(" {}", format!("({})", tool.title).dimmed()));
        }
        line.push_str(&format!(" - {} parameter(s)", tool.parameter_count()));
        if !tool.runnable {
            line.push_str(&format!(" {}", "[not runnable]".yellow()));
        }
        println!("{}", line);

        if opts.verbose > 0 && !tool.category.is_empty() {
            println!("    {} {}", "category:".dimmed(), tool.category);
        }
    }

    Ok(())
}
