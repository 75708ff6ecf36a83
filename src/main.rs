// src/main.rs

use tend::config::{self, Resolution};
use tend::errors::Result;
use tend::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        println!("tend error: {err}");
        std::process::exit(1);
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse();
    match config::resolve(&args)? {
        Resolution::ShowUsage => {
            cli::print_usage()?;
            Ok(())
        }
        Resolution::Ready(cfg) => {
            logging::init_logging(args.log_level, cfg.verbose)?;
            run(cfg).await
        }
    }
}
