use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};
use log::{error, warn};

use offline_snake::app::SnakeGame;
use offline_snake::config::{self, Config};
use offline_snake::score::ScoreFile;
use offline_snake::Result;

fn main() {
    let data_dir = config::data_dir();
    init_logging(&data_dir);

    if let Err(e) = run(&data_dir) {
        error!("{}", e);
        eprintln!("snake: {}", e);
        std::process::exit(1);
    }
}

fn run(data_dir: &Path) -> Result<()> {
    let config = Config::load()?;
    let scores = ScoreFile::in_dir(data_dir);
    let best = scores.load().unwrap_or_else(|e| {
        warn!("ignoring unreadable score file {}: {}", scores.path().display(), e);
        0
    });

    let mut game = SnakeGame::new(config, scores, best)?;

    restoring(
        &mut game,
        |game| {
            game.initialize()?;
            if game.show_intro()? {
                game.play()?;
            }
            Ok(())
        },
        SnakeGame::restore,
    )
}

/// Runs `body`, then `restore` no matter how `body` ended, including a setup
/// inside it that failed halfway. The first error wins.
fn restoring<T>(
    target: &mut T,
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let res = body(target);
    let restored = restore(target);
    res.and(restored)
}

/// Logs go to a file: the game owns the terminal while it runs.
fn init_logging(data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let file = match OpenOptions::new().create(true).append(true).open(data_dir.join("snake.log")) {
        Ok(file) => file,
        Err(_) => return,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use offline_snake::Error;

    fn failure(msg: &str) -> Error {
        Error::InvalidConfig(msg.into())
    }

    #[test]
    fn restores_after_a_failed_setup() {
        let mut log = Vec::new();
        let res = restoring(
            &mut log,
            |log| {
                log.push("setup");
                Err(failure("raw mode"))
            },
            |log| {
                log.push("restore");
                Ok(())
            },
        );

        assert!(matches!(res, Err(Error::InvalidConfig(msg)) if msg == "raw mode"));
        assert_eq!(log, ["setup", "restore"]);
    }

    #[test]
    fn body_error_wins_over_restore_error() {
        let res = restoring(&mut (), |_| Err(failure("play")), |_| Err(failure("restore")));
        assert!(matches!(res, Err(Error::InvalidConfig(msg)) if msg == "play"));
    }

    #[test]
    fn restore_error_surfaces_after_a_clean_run() {
        let mut restored = false;
        let res = restoring(
            &mut restored,
            |_| Ok(()),
            |restored| {
                *restored = true;
                Err(failure("restore"))
            },
        );
        assert!(restored);
        assert!(matches!(res, Err(Error::InvalidConfig(msg)) if msg == "restore"));
    }
}
