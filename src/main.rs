use clap::Parser;
use ridership_etl::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Ridership ETL - Transit Ridership Workbook Importer");
    println!("===================================================");
    println!();
    println!("Import periodically-updated ridership workbooks into a versioned store");
    println!("and recompute the aggregates behind the ridership dashboard.");
    println!();
    println!("USAGE:");
    println!("    ridership-etl <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    etl         Run the full ETL over a workbook");
    println!("    tables      Create the store snapshot if it does not exist");
    println!("    check       Check a workbook for its worksheets and ridership columns");
    println!("    snapshot    Export reporting data from the store as JSON");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Only log warnings and errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a workbook exported to ./ridership-2016:");
    println!("    ridership-etl etl ./ridership-2016 config.toml");
    println!();
    println!("    # Check a workbook and list the routes of one worksheet:");
    println!("    ridership-etl check ./ridership-2016 --routes \"Ridership by Route Weekday\"");
    println!();
    println!("    # Export the top route data:");
    println!("    ridership-etl snapshot top-routes config.toml -o top-routes.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ridership-etl <COMMAND> --help");
}
