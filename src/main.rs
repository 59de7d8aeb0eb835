use simplelog::*;
use upgrade_slicer::{extractor::Extractor, mapping::BATCHES};

const LOG_FILE: &str = "upgrade-slicer.log";

fn init_logging() {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    match std::fs::File::create(LOG_FILE) {
        Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
        Err(err) => eprintln!("not logging to {LOG_FILE}: {err}"),
    }
    if let Err(err) = CombinedLogger::init(loggers) {
        eprintln!("failed to initialize logger: {err}");
    }
}

fn main() {
    init_logging();

    let config = upgrade_slicer::config::Config::from_env();
    log::debug!("{config:?}");
    let extractor = Extractor::new(config.backend.tool(), config);
    log::info!(
        "slicing sheets in {}",
        extractor.config().input_dir.display()
    );
    extractor.extract_batches(&BATCHES);
}
