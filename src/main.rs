//! patent_class_counter CLI: 特許レコードの登録と分類件数の集計表示。
//! 保存は `JsonFileStore`、処理はすべて `PatentService` に委譲します。
mod cli;

use clap::Parser;
use cli::{Cli, Cmd, CompleteCmd, ConfigCmd, ConfigField};
use patent_class_counter::{
    PatentService,
    domain::{patent::NewPatent, report::SortSpec},
    infrastructure::{config::AppConfig, photo::encode_photo, store::JsonFileStore},
    utils::{config::EnvConfig, env::load_env, logging::init_logging},
};
use std::{fs, io::Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    EnvConfig::init();
    init_logging(EnvConfig::get().log_format, "warn");

    let cli = Cli::parse();
    let mut config = AppConfig::load();

    if let Cmd::Config { action } = &cli.cmd {
        match action {
            ConfigCmd::Set { field } => match field {
                ConfigField::StoreDir { path } => {
                    config.set_store_dir(path.clone())?;
                    println!("✅ store-dir set to {}", path.display());
                }
                ConfigField::PageSize { size } => {
                    config.items_per_page = Some(*size);
                    config.save()?;
                    println!("✅ page-size set to {}", config.items_per_page());
                }
            },
            ConfigCmd::Show => {
                println!("store-dir: {}", config.store_dir()?.display());
                println!("page-size: {}", config.items_per_page());
            }
        }
        return Ok(());
    }

    let store = JsonFileStore::new(config.store_dir()?)?;
    let mut svc = PatentService::open(store)?;

    match cli.cmd {
        Cmd::Add {
            title,
            classes,
            classes_file,
            url,
            photo,
        } => {
            let text = match (classes, classes_file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(path)?,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut new = NewPatent::new(title, text);
            if let Some(url) = url {
                new = new.with_url(url);
            }
            if let Some(path) = photo {
                new = new.with_photo(encode_photo(&path)?);
            }
            let title = new.title.clone();
            match svc.add_patent(new)? {
                Some(rec) => println!("✅ added #{} {}", rec.id, rec.title),
                None if title.is_empty() => println!("⚠️ title is empty, nothing added"),
                None if svc.contains_title(&title) => {
                    println!("⚠️ \"{}\" already exists, nothing added", title)
                }
                None => println!("⚠️ classification text is empty, nothing added"),
            }
        }
        Cmd::Remove { id } => match svc.remove_patent(id)? {
            Some(rec) => println!("🗑️ removed #{} {}", rec.id, rec.title),
            None => println!("⚠️ no patent with id {}", id),
        },
        Cmd::List { filter, page } => {
            let per_page = config.items_per_page();
            let total = svc.total_pages(&filter, per_page).max(1);
            let shown = page.clamp(1, total);
            if shown != page {
                println!("⚠️ page {} is out of range, showing page {}", page, shown);
            }
            let rows = svc.patents_page(&filter, shown, per_page);
            if rows.is_empty() {
                println!("(no patents)");
            }
            for p in rows {
                let photo = if p.photo.is_some() { "📷" } else { "  " };
                println!(
                    "{:>14}  {}  {}  {}  {}",
                    p.id,
                    p.date_added.format("%Y-%m-%d"),
                    photo,
                    p.title,
                    p.url.as_deref().unwrap_or("")
                );
            }
            println!("page {}/{}", shown, total);
        }
        Cmd::Photo { id, path } => {
            let data = encode_photo(&path)?;
            if svc.set_photo(id, data)? {
                println!("✅ photo set for #{}", id);
            } else {
                println!("⚠️ no patent with id {}", id);
            }
        }
        Cmd::Majors { sort } => {
            for row in svc.major_rows(SortSpec::from(sort)) {
                let mark = check(svc.completion().is_major_completed(&row.major_class));
                println!(
                    "{} {:<12} {:>5}  {}",
                    mark,
                    row.major_class,
                    row.count,
                    row.search_url()
                );
            }
        }
        Cmd::Minors { sort } => {
            for row in svc.minor_rows(SortSpec::from(sort)) {
                let mark = check(
                    svc.completion()
                        .is_minor_completed(&row.major_class, &row.minor_class),
                );
                println!(
                    "{} {:<20} {:>5}  {}",
                    mark,
                    row.label(),
                    row.minor_count,
                    row.search_url()
                );
            }
        }
        Cmd::Complete { target } => {
            let (label, state) = match target {
                CompleteCmd::Major { major } => {
                    let state = svc.toggle_major_completion(&major)?;
                    (major, state)
                }
                CompleteCmd::Minor { major, minor } => {
                    let state = svc.toggle_minor_completion(&major, &minor)?;
                    (format!("{}/{}", major, minor), state)
                }
            };
            println!("{} {}", check(state), label);
        }
        Cmd::Export { path } => {
            let csv = svc.export_csv();
            match path {
                Some(path) => {
                    fs::write(&path, csv)?;
                    println!("✅ exported {} patents to {}", svc.patents().len(), path.display());
                }
                None => println!("{}", csv),
            }
        }
        Cmd::Verify { repair } => {
            if svc.rebuilt_on_open() {
                println!("🔧 class counts were rebuilt from stored patents on load");
            }
            if svc.verify_counts() {
                println!("✅ class counts match {} patents", svc.patents().len());
            } else if repair {
                svc.repair_counts()?;
                println!("🔧 class counts rebuilt from {} patents", svc.patents().len());
            } else {
                println!("❌ class counts differ from stored patents (run with --repair)");
                std::process::exit(1);
            }
        }
        Cmd::Reset => {
            svc.reset()?;
            println!("🧹 all patents, counts and marks cleared");
        }
        Cmd::Config { .. } => {}
    }

    Ok(())
}

fn check(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}
