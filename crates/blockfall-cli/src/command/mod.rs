use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod default_config;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the default configuration as JSON
    DefaultConfig,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::DefaultConfig => default_config::run()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_subcommands() {
        let args = CommandArgs::try_parse_from(["blockfall", "default-config"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::DefaultConfig)));

        let args =
            CommandArgs::try_parse_from(["blockfall", "play", "--width", "10", "--seed", "7"])
                .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));

        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--width", "ten"]).is_err());
    }
}
