//! Tile Platformer entry point
//!
//! Parses a level plan and runs it headless until it is finished or the tick
//! budget runs out.
//!
//! Usage: `tile-platformer [LEVEL_FILE] [SETTINGS_JSON]`

const BUILTIN_PLAN: &[&str] = &[
    "    v     ",
    "          ",
    "       o  ",
    "      xxx ",
    " @   =    ",
    "xxxxx     ",
    "          ",
    "!!!!!!!!!!",
];

fn main() {
    env_logger::init();
    log::info!("Tile Platformer (native) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> tile_platformer::SimResult<()> {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use tile_platformer::sim::{TickInput, tick};
    use tile_platformer::{LevelParser, Settings};

    let mut args = std::env::args().skip(1);
    let level_path = args.next();
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let parser = LevelParser::new(settings.legend.clone()).strict(settings.strict_symbols);
    let mut rng = Pcg32::seed_from_u64(settings.seed);
    let level = match &level_path {
        Some(path) => {
            log::info!("Loading level from {}", path);
            parser.parse_str(&std::fs::read_to_string(path)?, &mut rng)?
        }
        None => parser.parse(BUILTIN_PLAN, &mut rng)?,
    };
    let mut level = level.with_finish_delay(settings.finish_delay);

    let input = TickInput::default();
    let mut ticks = 0;
    while !level.is_finished() && ticks < settings.max_ticks {
        tick(&mut level, &input, settings.step);
        ticks += 1;
    }

    match level.status() {
        Some(status) => log::info!("Level finished: {:?} after {} ticks", status, ticks),
        None => log::info!("Level still running after {} ticks", ticks),
    }
    log::debug!("Final actors: {}", serde_json::to_string(level.actors())?);

    Ok(())
}
