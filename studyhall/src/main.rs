mod cli;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{process::ExitCode, sync::Arc};
use studyhall_core::{
    api::{CafeApi, HttpCafeApi},
    config,
    state::AppState,
};
use studyhall_tui::Theme;

#[derive(Parser)]
#[command(version, about = "Study-cafe kiosk for the terminal")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the seat map as a table
    Seats {
        #[arg(long)]
        json: bool,
    },
    /// List tickets on sale
    Tickets {
        #[arg(long)]
        json: bool,
    },
    /// Check in to a seat with an existing ticket
    CheckIn {
        phone: String,
        seat: u32,
        /// Order id from a purchase in the same visit
        #[arg(long)]
        order: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Check out of a seat
    CheckOut {
        seat: u32,
        /// Guest credential: phone used at check-in
        #[arg(long)]
        phone: Option<String>,
        /// Member credential: account PIN
        #[arg(long)]
        pin: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Buy a ticket at the kiosk counter
    Purchase {
        product: u32,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        member: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Book a ticket through the web flow (seat, mileage, payment)
    Book {
        product: u32,
        /// Fixed desk to reserve; required for period passes
        #[arg(long)]
        seat: Option<u32>,
        /// Mileage points to deduct from the price
        #[arg(long, default_value_t = 0)]
        point: u32,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = command_wants_json(cli.command.as_ref());
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = crate::cli::CliError::system(error.to_string());
            crate::cli::print_error(&cli_error, json_errors);
            return ExitCode::from(2);
        }
    };

    let api: Arc<dyn CafeApi> = Arc::new(HttpCafeApi::new(
        &config.api.base_url,
        config.api.timeout(),
    ));

    let result = match cli.command {
        Some(Commands::Seats { json }) => crate::cli::cmd_seats(api.as_ref(), json),
        Some(Commands::Tickets { json }) => crate::cli::cmd_tickets(api.as_ref(), json),
        Some(Commands::CheckIn {
            phone,
            seat,
            order,
            json,
        }) => {
            let args = crate::cli::CheckInArgs {
                phone,
                seat,
                order,
                json,
            };
            crate::cli::cmd_check_in(api.as_ref(), &args)
        }
        Some(Commands::CheckOut {
            seat,
            phone,
            pin,
            json,
        }) => {
            let args = crate::cli::CheckOutArgs {
                seat,
                phone,
                pin,
                json,
            };
            crate::cli::cmd_check_out(api.as_ref(), &args)
        }
        Some(Commands::Purchase {
            product,
            phone,
            member,
            json,
        }) => {
            let args = crate::cli::PurchaseArgs {
                product,
                phone,
                member,
                json,
            };
            crate::cli::cmd_purchase(api.as_ref(), &args)
        }
        Some(Commands::Book {
            product,
            seat,
            point,
            json,
        }) => {
            let args = crate::cli::BookArgs {
                product,
                seat,
                point,
                json,
            };
            crate::cli::cmd_book(api.as_ref(), &args)
        }
        None => run_tui(&config, &api).map_err(crate::cli::CliError::from),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            crate::cli::print_error(&error, json_errors);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}

fn run_tui(config: &config::Config, api: &Arc<dyn CafeApi>) -> Result<()> {
    logging::setup_logging(logging::log_level())?;

    let mut state = AppState::new();
    state.payment_timings = config.payment.timings();
    let theme = Theme::from_config(&config.theme);

    let mut terminal = if should_disable_alt_screen() {
        // Inline viewport keeps drawing in the primary screen buffer, which makes
        // tmux capture-pane output usable for automation/debugging.
        ratatui::init_with_options(ratatui::TerminalOptions {
            viewport: ratatui::Viewport::Inline(30),
        })
    } else {
        ratatui::init()
    };
    let result = studyhall_tui::run(
        &mut terminal,
        &mut state,
        api,
        &theme,
        config.poll.seat_refresh(),
    );
    ratatui::restore();

    result
}

fn command_wants_json(command: Option<&Commands>) -> bool {
    match command {
        Some(
            Commands::Seats { json }
            | Commands::Tickets { json }
            | Commands::CheckIn { json, .. }
            | Commands::CheckOut { json, .. }
            | Commands::Purchase { json, .. }
            | Commands::Book { json, .. },
        ) => *json,
        None => false,
    }
}

fn should_disable_alt_screen() -> bool {
    match std::env::var("STUDYHALL_NO_ALT_SCREEN") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Err(_) => false,
    }
}
