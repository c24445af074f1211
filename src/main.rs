use anyhow::Result;
use clap::Parser;

use churnline::{
    cli::Cli,
    monitor::{install_interrupt_handler, run_monitor, run_once},
    SystemGit,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.setup_logging();

    let config = cli.to_config();
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    let git = SystemGit::current_dir().with_binary(config.git_binary.clone());
    let mut stdout = std::io::stdout().lock();

    if cli.monitor {
        let running = install_interrupt_handler()?;
        run_monitor(&git, &config, &mut stdout, &running)?;
    } else {
        run_once(&git, &config, &mut stdout)?;
    }

    Ok(())
}
