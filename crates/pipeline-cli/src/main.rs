use pipeline_cli::{cli, logging, run};

fn main() -> anyhow::Result<()> {
    logging::setup_logging()?;

    let matches = cli().get_matches();
    let stdout = std::io::stdout();
    run(&matches, &mut stdout.lock())
}
