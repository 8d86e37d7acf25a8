use clap::Parser;
use git_scout::{git_scout_main, GitScoutCli};
use std::process::exit;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = GitScoutCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();
    match git_scout_main(args).await {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };
}
