//! Command line options for the gitlab-group-clone tool
use crate::{
    config::{GroupCloneConfig, DEFAULT_CONFIG_PATH},
    errors::GroupCloneError,
    utils::main_clone,
};
use clap::Parser;
use std::path::PathBuf;

/// gitlab-group-clone - Clone every repository of a GitLab group
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct GroupCloneCli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Verbose mode (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GroupCloneCli {
    /// Log level matching the verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Run the gitlab-group-clone tool with the provided command line options
/// # Errors
/// Error if the configuration can't be loaded or the discovery fails
pub async fn group_clone_main(args: GroupCloneCli) -> Result<(), GroupCloneError> {
    let config = GroupCloneConfig::try_from_path(&args.config)?;
    log::debug!("{config:?}");
    main_clone(&config).await?;
    Ok(())
}

/// Process exit code for the outcome of [`group_clone_main`]
///
/// Failed clones don't show here, only configuration and discovery errors do.
pub fn exit_code(result: &Result<(), GroupCloneError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
