mod app;
mod cli;

use cli::CLIOpts;
use std::process;
use structopt::StructOpt;

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if let Err(e) = app::run(cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}
