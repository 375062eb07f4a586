use patent_class_counter::{
    PatentService,
    infrastructure::{config::AppConfig, store::JsonFileStore},
    utils::{config::EnvConfig, env::load_env, logging::init_logging},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    EnvConfig::init();
    init_logging(EnvConfig::get().log_format, "info");

    let dir = AppConfig::load().store_dir()?;
    let svc = PatentService::open(JsonFileStore::new(&dir)?)?;
    let repaired = svc.rebuilt_on_open();
    svc.save_all()?; // save again to write the current shape
    println!(
        "✅ store migrated ({} patents, {} major classes{}) at {}",
        svc.patents().len(),
        svc.class_counts().len(),
        if repaired { ", counts rebuilt" } else { "" },
        dir.display()
    );
    Ok(())
}
