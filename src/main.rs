use anyhow::Result;
use match_import::Config;
use structopt::StructOpt;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_args();
    let summary = match_import::run(&config)?;
    println!("{}", summary);
    Ok(())
}
