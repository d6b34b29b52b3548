use clap::Parser;
use env_logger::Env;

use proto_goldens::cli::Cli;
use proto_goldens::refresh;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let _cli = Cli::parse();

    match refresh::run() {
        Ok(staged) => println!("Staged {} fixture files; unchanged copies reverted", staged),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
