use clap::Parser;
use std::process;
use taskmate::{
    run_menu, Cli, Menu, OperationRequest, OutputFormatter, OutputMode, TaskMate, TaskMateError,
    UserFriendlyError,
};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.log_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let taskmate = match TaskMate::from_cli(&cli) {
        Ok(taskmate) => taskmate,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    match cli.request() {
        Some(request) => run_once(&taskmate, request).await,
        None => run_interactive(&taskmate).await,
    }
}

async fn run_once(taskmate: &TaskMate, request: OperationRequest) -> i32 {
    match taskmate.dispatch(request).await {
        Ok(report) => {
            taskmate.output_formatter().print_report(&report);

            if report.warnings().is_empty() {
                0
            } else {
                2 // Success with warnings
            }
        }
        Err(e) => {
            taskmate.handle_error(&e);
            e.exit_code()
        }
    }
}

async fn run_interactive(taskmate: &TaskMate) -> i32 {
    let stdin = std::io::stdin();
    let mut menu = Menu::new(stdin.lock(), std::io::stdout());

    match run_menu(taskmate, &mut menu).await {
        Ok(()) => 0,
        Err(e) => {
            taskmate.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "taskmate.toml".to_string());

    match TaskMate::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  taskmate --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &TaskMateError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(default_level: &str) {
    // RUST_LOG wins over the verbosity flags.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
