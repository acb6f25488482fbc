use clap::Parser;
use console::style;

use tape_xs_build::cli::{run_build, Args};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run_build(&args).await {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}
