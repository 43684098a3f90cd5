use clap::Parser;
use gitlab_group_clone::{exit_code, group_clone_main, GroupCloneCli};
use std::process::exit;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = GroupCloneCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();
    let result = group_clone_main(args).await;
    if let Err(e) = &result {
        log::error!("{e}");
    }
    exit(exit_code(&result));
}
