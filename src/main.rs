use clap::Parser;

mod app;
mod boundary;
mod config;
mod flux;
mod grp;
mod io;
mod mesh;
mod physics;
mod riemann;
mod scheme;
mod slope;
mod state;
mod tasks;
mod traits;
mod updater;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = app::Cli::parse();

    if let Err(error) = app::App::run(&cli) {
        tracing::error!(error = %error, "run failed");
        std::process::exit(error.exit_code());
    }
}
