mod commands;
mod terminal;

use commands::{
    App, CommandLine, Commands, account, bookings, customers, dashboard, reports, reviews,
    vehicles,
};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner(commands.no_banner, commands.quiet);

    let app: App = App::connect(&commands)?;
    let q: u8 = app.cfg.quiet;

    let result: anyhow::Result<()> = match commands.command {
        Commands::Login { email, password } => {
            print::header("signing in", q);
            account::login(&app, &email, password).await
        }
        Commands::Signup {
            email,
            password,
            profile,
        } => {
            print::header("creating account", q);
            account::signup(&app, &email, password, profile).await
        }
        Commands::Logout => account::logout(&app).await,
        Commands::Whoami => account::whoami(&app).await,
        Commands::Profile { profile } => account::update_profile(&app, profile).await,
        Commands::Dashboard => dashboard::dashboard(&app).await,
        Commands::Vehicles(cmd) => vehicles::run(&app, cmd).await,
        Commands::Bookings(cmd) => bookings::run(&app, cmd).await,
        Commands::Customers(cmd) => customers::run(&app, cmd).await,
        Commands::Reviews(cmd) => reviews::run(&app, cmd).await,
        Commands::Reports(cmd) => reports::run(&app, cmd).await,
    };

    if q == 0 {
        print::end_of_program();
    }
    result
}
